/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; field `database_url` maps to `DATABASE_URL`.
/// Missing optional fields fall back to their `#[serde(default)]`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    /// Load from the process environment.
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of variables (tests, embedded launches).
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}
