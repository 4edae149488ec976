mod conversion;
pub use conversion::*;

mod root;
pub use root::*;
