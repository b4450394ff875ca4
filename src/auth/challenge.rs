//! Challenge page rendering.
//!
//! Output depends only on `(username, login_path, logout_path)` so a page can
//! be cached or compared byte-for-byte. The watcher script is also attached to
//! pass-through requests so downstream handlers can embed it verbatim in their
//! own markup.

/// Client-side watcher registration.
///
/// Binds the browser identity watcher to the current username (`null` when
/// unauthenticated), posts the obtained assertion to the login path, issues a
/// GET to the logout path, and reloads on success or alerts on failure.
#[must_use]
pub fn watcher_script(username: Option<&str>, login_path: &str, logout_path: &str) -> String {
    let logged_in_user = json_string(&username);
    let login = json_string(&login_path);
    let logout = json_string(&logout_path);

    format!(
        r#"navigator.id.watch({{
  loggedInUser: {logged_in_user},
  onlogin: function (assertion) {{
    var xhr = new XMLHttpRequest();
    xhr.open("POST", {login}, true);
    xhr.setRequestHeader("Content-Type", "application/x-www-form-urlencoded");
    xhr.addEventListener("loadend", function (e) {{
      if (this.status === 200) {{
        window.location.reload();
      }} else {{
        navigator.id.logout();
        alert("sign-in failed: " + this.status);
      }}
    }}, false);
    xhr.send("assertion=" + encodeURIComponent(assertion));
  }},
  onlogout: function () {{
    var xhr = new XMLHttpRequest();
    xhr.open("GET", {logout}, true);
    xhr.addEventListener("loadend", function (e) {{
      window.location.reload();
    }}, false);
    xhr.send();
  }}
}});"#
    )
}

/// Full page served instead of the normal handler when the session is
/// unauthenticated. Triggers the client identity flow immediately.
#[must_use]
pub fn challenge_page(watcher_script: &str) -> String {
    format!(
        r#"<html><head>
<script src="https://login.persona.org/include.js"></script>
<script>
{watcher_script}
navigator.id.request();
</script>
</head>
<body>
Please sign in...
</body>
</html>
"#
    )
}

fn json_string<T: serde::Serialize>(value: &T) -> String {
    // Strings and Option<&str> cannot fail to serialize. `<` is escaped so a
    // value containing `</script>` cannot terminate the surrounding script
    // element when the output is embedded in host markup.
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}
