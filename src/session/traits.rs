use crate::models::User;

/// Source of the signed-in identity and the bearer token used for API calls
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn token(&self) -> Option<String>;
}
