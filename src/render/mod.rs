pub(crate) mod blend;
pub(crate) mod compositor;
pub(crate) mod resample;
pub(crate) mod surface;
