pub(crate) mod blend;
pub(crate) mod depth;
pub(crate) mod negotiate;
pub(crate) mod palette;
pub(crate) mod surface;
