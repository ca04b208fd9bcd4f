pub(crate) mod bin;
pub(crate) mod opts;
pub(crate) mod transition;
