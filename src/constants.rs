// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Size of the random-token space for synthesized storage keys.
///
/// An upload key is `{user}-{token}{file_name}` with `token` drawn uniformly
/// from `0..STORAGE_KEY_TOKEN_SPACE`. The space only has to be large enough
/// that two uploads of the same file name by the same user will practically
/// never collide; unguessability is not a goal.
///
/// Used in: `application/workflow.rs`
pub const STORAGE_KEY_TOKEN_SPACE: u128 = 900_000_000_000_000_000_000;

/// Environment variable that overrides the access token from the config file.
///
/// Used in: `infrastructure/config.rs`
pub const TOKEN_ENV_VAR: &str = "CLOUDNOTES_TOKEN";
