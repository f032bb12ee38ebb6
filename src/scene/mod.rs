/// Timeline item types and their JSON shape.
pub mod model;
/// The timeline document: load, save, validate.
pub mod timeline;
