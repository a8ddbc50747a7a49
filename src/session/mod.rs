pub mod mock_auth;
pub mod traits;
pub mod types;

pub use mock_auth::{AuthError, MockAuth};
pub use traits::SessionProvider;
pub use types::{SettingsUpdate, SignupData, UserUpdate};
