use crate::{api::attendance, auth::middleware::auth_middleware, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .milliseconds_per_request((60_000 / requests_per_min as u64).max(1))
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("rate limiter period and burst are non-zero");
        Governor::new(&cfg)
    }

    let protected_limiter = build_limiter(config.rate_protected_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance/records
                    .service(
                        web::resource("/records")
                            .route(web::get().to(attendance::monthly_records)),
                    )
                    // /attendance/records/export
                    .service(
                        web::resource("/records/export")
                            .route(web::get().to(attendance::export_monthly_records)),
                    )
                    .service(
                        web::resource("/history")
                            .route(web::get().to(attendance::history_records)),
                    )
                    .service(
                        web::resource("/daily").route(web::get().to(attendance::daily_records)),
                    )
                    // /attendance/employee/{id}
                    .service(
                        web::resource("/employee/{id}")
                            .route(web::get().to(attendance::employee_records)),
                    )
                    .service(
                        web::resource("/employee/{id}/export")
                            .route(web::get().to(attendance::export_employee_records)),
                    )
                    .service(
                        web::resource("/employee/{id}/extra-time")
                            .route(web::get().to(attendance::employee_extra_time)),
                    ),
            ),
    );
}
