pub use event_dispatch_core::{classify, config, context, contract};
