pub(crate) mod direct;
pub(crate) mod matching;
pub mod normalize;
pub mod report;
pub mod script;
pub mod sentences;
pub mod similarity;
pub(crate) mod timing;
