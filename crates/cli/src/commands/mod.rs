pub(crate) mod matching;
pub(crate) mod serve;
pub(crate) mod targets;
