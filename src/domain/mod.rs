mod money;
mod report;
mod transaction;

pub use money::*;
pub use report::*;
pub use transaction::*;
