use typed_builder::TypedBuilder;

/// Tunables for [`RegistryService`](crate::RegistryService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RegistrySettings {
    /// Total attempts at storing a generated code before giving up with
    /// [`RegistryError::Exhausted`](crate::RegistryError::Exhausted).
    /// Values below 1 are treated as 1.
    #[builder(default = 5)]
    pub max_attempts: u32,
}

impl RegistrySettings {
    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
