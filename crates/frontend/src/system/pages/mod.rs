mod credentials_form;
pub mod landing;
pub mod login;
pub mod signup;

pub use credentials_form::failure_message;
