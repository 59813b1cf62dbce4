pub mod bookmark;
pub mod configs;
pub mod errors;
pub mod guards;
pub mod sanitize;
pub mod validation;

// The only route outside the bearer-token gate.
#[get("/")]
pub fn index() -> &'static str {
    "Hello, world!"
}
