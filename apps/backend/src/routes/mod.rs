use actix_web::web;

pub mod fishes;
pub mod health;
pub mod rankings;

/// Register every route. Shared by `main` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/fishes").configure(fishes::configure_routes));
    cfg.service(web::scope("/api/rounds").configure(rankings::configure_routes));
}
