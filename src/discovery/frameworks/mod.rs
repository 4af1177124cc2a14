//! Grammar descriptors for the supported routing frameworks.

mod chi;
mod echo;
mod fiber;
mod gin;
mod nethttp;

pub use chi::CHI;
pub use echo::ECHO;
pub use fiber::FIBER;
pub use gin::GIN;
pub use nethttp::NET_HTTP;

use super::grammar::FrameworkGrammar;

/// All grammars in detection order.
pub static ALL: [&FrameworkGrammar; 5] = [&GIN, &ECHO, &CHI, &FIBER, &NET_HTTP];
