pub(crate) mod editor;
pub(crate) mod notify;
pub(crate) mod script;
pub(crate) mod slider;
