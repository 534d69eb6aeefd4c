pub mod client;

pub use client::OpenAiSessionClient;
