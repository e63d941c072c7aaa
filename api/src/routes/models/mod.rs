pub mod models_route;
