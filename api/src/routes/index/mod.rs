pub mod index_route;
pub mod index_template;
