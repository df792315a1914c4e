#[path = "body.enum.rs"]
mod body;
pub use self::body::Body;

#[path = "http_response.struct.rs"]
mod http_response;
pub use self::http_response::{CONTENT_TYPE, HttpResponse};

#[path = "http_request.struct.rs"]
mod http_request;
pub use self::http_request::HttpRequest;

#[path = "http_method.enum.rs"]
mod http_method;
pub use self::http_method::HttpMethod;

mod extensions;
pub use self::extensions::Extensions;
