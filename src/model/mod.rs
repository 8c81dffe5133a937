mod client;
mod echo;
mod guard;
mod loader;

pub use client::{ChatModel, ModelHandle, OpenAiModel};
#[cfg(test)]
pub use client::MockChatModel;
pub use echo::EchoModel;
pub use guard::GuardedModel;
pub use loader::load;
