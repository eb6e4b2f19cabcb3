pub mod claims;
pub mod errors;
pub mod issuer;
pub mod signer;

pub use claims::Claims;
pub use errors::TokenError;
pub use issuer::TokenConfig;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenPurpose;
pub use signer::TokenSigner;
