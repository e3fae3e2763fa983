pub mod dispatcher;
pub mod validator;

pub use dispatcher::Dispatcher;
pub use validator::Validator;
