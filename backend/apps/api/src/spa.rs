//! Frontend route table and single-page app serving
//!
//! The React app routes on the client. Deep links to any of its pages must
//! still load `index.html`; everything else under the static directory is
//! served as a file.

use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Frontend page names and their paths; `:name` is a path parameter
pub const ROUTES: &[(&str, &str)] = &[
    ("HOME", "/"),
    ("REGISTER", "/register"),
    ("LOGIN", "/login"),
    ("EDITCARD", "/editcard"),
    ("CREATECARD", "/CreateCardPage"),
    ("SANDBOX", "/sandboxPage"),
    ("ABOUT", "/About"),
    ("FAVCARD", "/favoriteCardPage"),
    ("MYCARDS", "/MyCardsPage"),
    ("EDITSTATUS", "/EditStatusPage"),
    ("EDITCARDPAGE", "/EditCardPage"),
    ("EDITPROFILE", "/EditProfile"),
    ("CARDDETAILS", "/CardDetailsPage"),
    ("CARTPAGE", "/CartPage"),
    ("CHECKOUTPAGE", "/Chekcoutpage"),
    ("PRIVACYPOLICY", "/PrivacyPolicy"),
    ("FAQ", "/FAQ"),
    ("CONTACTUS", "/ContactUs"),
    ("THANKYOUPAGE", "/ThankYouPage"),
    ("CARDINFORMATIONPAGE", "/CardInformationPage"),
    ("VERIFICATIONPAGE", "/VerificationPage"),
    // Relative in the frontend; matched as if rooted
    ("FORGOTPASSWORD", "ForgotPassword"),
    ("EDITSTATUSPAGE", "/EditStatusPage"),
    ("RESETPASSWORD", "/ResetPassword/:userId/:token"),
];

/// Segment-wise match; `:param` matches exactly one non-empty segment
pub fn matches_route(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.trim_matches('/').split('/');
    let mut path_segments = path.trim_matches('/').split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) => {
                let ok = if p.starts_with(':') {
                    !s.is_empty()
                } else {
                    p == s
                };
                if !ok {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

pub fn is_frontend_route(path: &str) -> bool {
    ROUTES.iter().any(|(_, pattern)| matches_route(pattern, path))
}

/// GET /api/routes
pub async fn routes_table() -> Json<Map<String, Value>> {
    Json(
        ROUTES
            .iter()
            .map(|(name, path)| (name.to_string(), Value::from(*path)))
            .collect(),
    )
}

#[derive(Clone)]
struct Frontend {
    assets: ServeDir,
    index: PathBuf,
}

/// Service for every path the API routes leave unmatched
pub fn frontend_service(dir: &Path) -> Router {
    let frontend = Frontend {
        assets: ServeDir::new(dir),
        index: dir.join("index.html"),
    };
    Router::new().fallback(serve_frontend).with_state(frontend)
}

async fn serve_frontend(State(frontend): State<Frontend>, req: Request) -> Response {
    let result = if is_frontend_route(req.uri().path()) {
        ServeFile::new(&frontend.index).oneshot(req).await
    } else {
        frontend.assets.clone().oneshot(req).await
    };

    match result {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}
