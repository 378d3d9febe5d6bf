pub mod group;
pub mod main;
pub mod stream;
pub mod timestamp;
pub mod word;

pub use group::*;
pub use main::*;
pub use stream::*;
pub use timestamp::*;
pub use word::*;
