mod predictive_http;

pub use predictive_http::{
    API_KEY_VAR, API_URL_VAR, GeneratorConfig, HttpGenerator, MODEL_VAR,
};
