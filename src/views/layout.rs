use crate::utils::html::escape;

/// Which navbar links a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Guest,
    Member,
}

pub(crate) fn layout(title: &str, nav: Nav, main: &str) -> String {
    let links = match nav {
        Nav::Member => {
            r#"<ul class="navbar-nav me-auto mt-2">
                <li class="nav-item"><a class="nav-link" href="/quote">Quote</a></li>
                <li class="nav-item"><a class="nav-link" href="/buy">Buy</a></li>
                <li class="nav-item"><a class="nav-link" href="/sell">Sell</a></li>
                <li class="nav-item"><a class="nav-link" href="/history">History</a></li>
            </ul>
            <ul class="navbar-nav ms-auto mt-2">
                <li class="nav-item"><a class="nav-link" href="/logout">Log Out</a></li>
            </ul>"#
        }
        Nav::Guest => {
            r#"<ul class="navbar-nav ms-auto mt-2">
                <li class="nav-item"><a class="nav-link" href="/register">Register</a></li>
                <li class="nav-item"><a class="nav-link" href="/login">Log In</a></li>
            </ul>"#
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="initial-scale=1, width=device-width">
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
    <title>C$50 Finance: {title}</title>
</head>
<body>
    <nav class="bg-light border navbar navbar-expand-md navbar-light">
        <div class="container-fluid">
            <a class="navbar-brand" href="/"><span class="blue">C</span><span class="red">$</span><span class="yellow">5</span><span class="green">0</span> <span class="red">Finance</span></a>
            <div class="collapse navbar-collapse" id="navbar">
            {links}
            </div>
        </div>
    </nav>
    <main class="container-fluid py-5 text-center">
    {main}
    </main>
</body>
</html>"#,
        title = escape(title),
        links = links,
        main = main,
    )
}

pub(crate) fn form_field(name: &str, kind: &str, placeholder: &str, autofocus: bool) -> String {
    format!(
        r#"<div class="mb-3"><input autocomplete="off" {autofocus}class="form-control mx-auto w-auto" name="{name}" placeholder="{placeholder}" type="{kind}"></div>"#,
        autofocus = if autofocus { "autofocus " } else { "" },
        name = name,
        placeholder = escape(placeholder),
        kind = kind,
    )
}
