use rocket::{
    figment::Figment,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Config {
    /// Shared secret expected in `Authorization: Bearer <token>`.
    /// Unset disables the auth gate.
    pub api_token: Option<String>,
}

pub fn config_provider() -> Figment {
    use rocket::figment::providers::{Env, Serialized};

    Figment::from(rocket::Config::default())
        .merge(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("LINKSTASH_").global())
}
