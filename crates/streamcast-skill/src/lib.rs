//! Request dispatch for the Streamcast skill.
//!
//! Resolves the locale's prompt table, routes each request to the first
//! handler whose predicate accepts it, and turns any failure inside the
//! cycle into a spoken, localized error.

pub mod dispatcher;
pub mod error;
pub mod exception;
pub mod handler;
pub mod input;
pub mod interceptor;
pub mod locale;
pub mod prompts;
pub mod skill;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::Dispatcher;
pub use error::SkillError;
pub use exception::{CatchAllExceptionHandler, ExceptionHandler};
pub use handler::RequestHandler;
pub use input::HandlerInput;
pub use interceptor::{RequestInterceptor, ResponseInterceptor};
pub use locale::LocaleResolver;
pub use prompts::{PromptTable, PromptValue};
pub use skill::{Skill, SkillBuilder};
