//! CLI command implementations.

pub(crate) mod generate_tokens;
pub(crate) mod sign;

pub(crate) use generate_tokens::GenerateTokensArgs;
pub(crate) use sign::SignArgs;
