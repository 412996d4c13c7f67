use crate::errors::ServerError;
use crate::templates::desktop_layout;
use astra::{Body, Response, ResponseBuilder};
use maud::html;

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::RemoteUnavailable(_) => {
            format!("{err}. Nothing was changed; please try again.")
        }
        _ => err.to_string(),
    };

    render_error(status, &message)
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = desktop_layout(
        &format!("Error {status}"),
        None,
        html! {
            main class="container narrow" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/dashboard" { "← Back to records" } }
            }
        },
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn body_of(resp: Response) -> String {
        let mut body = String::new();
        resp.into_body().reader().read_to_string(&mut body).unwrap();
        body
    }

    #[test]
    fn not_found_renders_404_page() {
        let resp = html_error_response(ServerError::NotFound);
        assert_eq!(resp.status(), 404);
        assert!(body_of(resp).contains("Not Found"));
    }

    #[test]
    fn remote_failure_says_nothing_changed() {
        let resp = html_error_response(ServerError::RemoteUnavailable("timeout".into()));
        assert_eq!(resp.status(), 502);
        assert!(body_of(resp).contains("Nothing was changed"));
    }
}
