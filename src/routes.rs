use crate::{
    api::{attendance, dashboard, employee, health},
    config::Config,
    error::extractor_error,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::anyhow;

pub type RateLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter shared by every worker.
pub fn rate_limiter(requests_per_min: u32) -> anyhow::Result<RateLimiter> {
    let requests_per_min = requests_per_min.max(1);
    GovernorConfigBuilder::default()
        .per_millisecond((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimiter) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| extractor_error(err)))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| extractor_error(err)));

    // Public probes
    cfg.route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::resource("/departments").route(web::get().to(employee::list_departments)),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::attendance_by_employee)),
                    )
                    // /attendance/employee/{employee_id}/export
                    .service(
                        web::resource("/employee/{employee_id}/export")
                            .route(web::get().to(attendance::export_attendance)),
                    )
                    // /attendance/date/{date}
                    .service(
                        web::resource("/date/{date}")
                            .route(web::get().to(attendance::attendance_by_date)),
                    )
                    // /attendance/date/{date}/unmarked
                    .service(
                        web::resource("/date/{date}/unmarked")
                            .route(web::get().to(attendance::unmarked_on_date)),
                    ),
            )
            .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard))),
    );
}
