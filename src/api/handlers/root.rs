use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::auth::{ChallengeScript, CurrentUser};

/// Demo application page behind the gate.
///
/// Only reachable on pass-through, so the gate has already attached the
/// current user and the watcher script; embedding the script keeps the
/// browser watcher bound to the signed-in identity.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting for the signed-in user", content_type = "text/html"),
    ),
    tag = "app",
)]
pub async fn root(
    user: Option<Extension<CurrentUser>>,
    script: Option<Extension<ChallengeScript>>,
) -> Html<String> {
    let username = user.map_or_else(|| "anonymous".to_string(), |Extension(CurrentUser(name))| name);
    let watcher = script.map_or_else(String::new, |Extension(ChallengeScript(s))| s);

    Html(format!(
        r#"<html><head>
<script src="https://login.persona.org/include.js"></script>
<script>
{watcher}
</script>
</head>
<body>
Hello {username}
</body>
</html>
"#
    ))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
