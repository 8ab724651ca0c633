//! OpenAPI specification generation and app factory.

use crate::{
    config::{MetricsConfig, SecurityHeadersConfig, StargazerConfig},
    handlers::{
        get_metrics, health, iss, light_pollution, stargazing, stargazing_possibility, timezone,
        version, weather,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware, SecurityHeaders},
    services::AppMetrics,
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Stargazer API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Tells you whether tonight is a good night to look at the stars.\n\n\
                Location endpoints take `?lat=<degrees>&lng=<degrees>`. Missing or invalid \
                coordinates are answered with `400 {\"error\": \"...\"}`, except on \
                `/api/light-pollution`, which falls back to a coarse estimate.\n\
                \n\
                **Upstreams:**\n\
                - OpenWeatherMap current weather (requires `OPENWEATHER_API_KEY`)\n\
                - Open Notify ISS position\n\
                \n\
                `/api/stargazing` keeps answering when the weather provider is down; \
                weather factors are then reported as `Unknown`."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with every route and middleware
///
/// `metrics` is passed in so the collector and its registry outlive the
/// per-worker app instances.
pub fn create_app(
    config: StargazerConfig,
    metrics: web::Data<AppMetrics>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let security_config = SecurityHeadersConfig::from_env();
    let metrics_config = MetricsConfig::from_env();

    App::new()
        .wrap(SecurityHeaders::new(security_config))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(metrics_config))
        .app_data(metrics)
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(web::resource("/api/iss").route(web::get().to(iss)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/stargazing").route(web::get().to(stargazing)))
        .service(
            web::resource("/api/stargazing-possibility")
                .route(web::get().to(stargazing_possibility)),
        )
        .service(web::resource("/api/light-pollution").route(web::get().to(light_pollution)))
        .service(web::resource("/api/timezone").route(web::get().to(timezone)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
