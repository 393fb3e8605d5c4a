//! Server-rendered chat page.

use std::fmt::Write as _;

use gptchat_ai::params::SAMPLING_RANGES;
use gptchat_ai::{SessionParams, Turn};

const PENDING_REFRESH_SECS: u32 = 2;

const API_REFERENCE_URL: &str = "https://platform.openai.com/docs/api-reference/chat";

/// Everything the page shows.
pub struct PageView<'a> {
    pub title: &'a str,
    pub history: &'a [Turn],
    pub params: &'a SessionParams,
    /// Text left in the input box, non-empty only after a failed turn.
    pub draft: &'a str,
    pub error: Option<&'a str>,
    pub total_tokens: u64,
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(view: &PageView<'_>) -> String {
    let title = escape_html(view.title);
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<h1>{title}</h1>
"#
    );

    if let Some(error) = view.error {
        let _ = writeln!(
            html,
            r#"<div class="error" role="alert">{}</div>"#,
            escape_html(error)
        );
    }

    html.push_str(&render_transcript(view.history));
    html.push_str(&render_form(view));

    let _ = write!(
        html,
        r#"<footer>{turns} turn(s) &middot; {tokens} tokens used &middot; model {model}</footer>
</main>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        turns = view.history.len(),
        tokens = view.total_tokens,
        model = escape_html(&view.params.model),
    );

    html
}

/// Small page for responses that carry no transcript.
pub fn render_notice(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title><style>{STYLE}</style></head>
<body><main><div class="error" role="alert">{message}</div><p><a href="/">Back to the conversation</a></p></main></body>
</html>
"#,
        title = escape_html(title),
        message = escape_html(message),
    )
}

/// Shown instead of the transcript while a turn for the session is in
/// flight. Reloads itself until the reply is committed.
pub fn render_pending(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><meta http-equiv="refresh" content="{PENDING_REFRESH_SECS}"><title>{title}</title><style>{STYLE}</style></head>
<body><main><div class="notice" role="status">A reply is still being generated for this conversation. This page refreshes on its own.</div></main></body>
</html>
"#,
        title = escape_html(title),
    )
}

fn render_transcript(history: &[Turn]) -> String {
    let mut html = String::from(r#"<section class="transcript" id="transcript">"#);
    if history.is_empty() {
        html.push_str(r#"<p class="empty">No messages yet.</p>"#);
    }
    for turn in history {
        let _ = write!(
            html,
            r#"<div class="bubble user">{}</div><div class="bubble assistant">{}</div>"#,
            escape_html(&turn.user),
            escape_html(&turn.assistant),
        );
    }
    html.push_str("</section>\n");
    html
}

fn render_form(view: &PageView<'_>) -> String {
    let mut sliders = String::new();
    for range in SAMPLING_RANGES {
        let value = view
            .params
            .sampling
            .value_of(&range)
            .unwrap_or(range.default);
        let _ = write!(
            sliders,
            r#"<label>{name} <output id="{name}-value">{value}</output>
<input type="range" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" oninput="document.getElementById('{name}-value').textContent=this.value"></label>
"#,
            name = range.name,
            min = range.min,
            max = range.max,
            step = range.step,
        );
    }

    format!(
        r#"<form method="post" action="/chat" id="chat-form">
<div class="row">
<textarea name="message" rows="2" placeholder="Message ChatGPT..." autofocus>{draft}</textarea>
<button type="submit">Submit</button>
</div>
<details>
<summary>GPT Parameters</summary>
<p>For parameter documentation see <a href="{API_REFERENCE_URL}">OpenAI Chat API Reference</a></p>
<label>system prompt
<input type="text" name="system_prompt" value="{system_prompt}"></label>
<div class="sliders">
{sliders}</div>
</details>
</form>
<form method="post" action="/reset"><button type="submit" class="secondary">Clear conversation</button></form>
"#,
        draft = escape_html(view.draft),
        system_prompt = escape_html(&view.params.system_prompt),
    )
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f6f6f7}\
main{max-width:860px;margin:0 auto;padding:16px}\
.transcript{height:500px;overflow-y:auto;background:#fff;border:1px solid #ddd;border-radius:8px;padding:12px}\
.bubble{white-space:pre-wrap;padding:8px 12px;border-radius:12px;margin:6px 0;max-width:80%}\
.user{background:#dbeafe;margin-left:auto}\
.assistant{background:#f1f1f1}\
.empty{color:#888}\
.row{display:flex;gap:8px;margin-top:12px}\
textarea{flex:9;min-width:0;font:inherit;padding:8px}\
button{padding:8px 16px}\
.secondary{margin-top:8px;background:none;border:1px solid #ccc}\
details{margin-top:12px}\
details label{display:block;margin:8px 0}\
details input[type=text]{width:100%}\
.sliders{display:flex;flex-wrap:wrap;gap:12px}\
.sliders label{min-width:200px;flex:1}\
.error{background:#fee2e2;border:1px solid #f87171;padding:8px 12px;border-radius:8px;margin-bottom:12px}\
.notice{background:#fef9c3;border:1px solid #facc15;padding:8px 12px;border-radius:8px}\
footer{color:#777;font-size:12px;margin-top:12px}";

const SCRIPT: &str = "var t=document.getElementById('transcript');if(t){t.scrollTop=t.scrollHeight;}\
var f=document.getElementById('chat-form');\
f.message.addEventListener('keydown',function(e){if(e.key==='Enter'&&!e.shiftKey){e.preventDefault();f.submit();}});";

#[cfg(test)]
mod tests {
    use super::*;
    use gptchat_ai::SamplingParams;

    fn view<'a>(history: &'a [Turn], params: &'a SessionParams) -> PageView<'a> {
        PageView {
            title: "ChatGPT",
            history,
            params,
            draft: "",
            error: None,
            total_tokens: 0,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn transcript_is_escaped() {
        let history = vec![Turn::new("<b>hi</b>", "1 < 2")];
        let params = SessionParams::default();
        let html = render_page(&view(&history, &params));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(html.contains("1 &lt; 2"));
        assert!(!html.contains("<b>hi</b>"));
    }

    #[test]
    fn sliders_use_documented_ranges() {
        let params = SessionParams::default();
        let html = render_page(&view(&[], &params));
        assert!(html.contains(r#"name="temperature" min="0" max="2" step="0.1" value="1""#));
        assert!(html.contains(r#"name="top_p" min="0" max="1" step="0.01" value="1""#));
        assert!(html.contains(r#"name="frequency_penalty" min="-2" max="2" step="0.1" value="0""#));
        assert!(html.contains(r#"name="presence_penalty" min="-2" max="2" step="0.1" value="0""#));
    }

    #[test]
    fn form_echoes_current_params() {
        let params = SessionParams::default()
            .with_system_prompt("Say \"hi\"")
            .with_sampling(SamplingParams {
                temperature: 0.7,
                ..SamplingParams::default()
            });
        let html = render_page(&view(&[], &params));
        assert!(html.contains(r#"value="Say &quot;hi&quot;""#));
        assert!(html.contains(r#"name="temperature" min="0" max="2" step="0.1" value="0.7""#));
        assert!(html.contains("GPT Parameters"));
        assert!(html.contains("Message ChatGPT..."));
    }

    #[test]
    fn error_and_draft_are_rendered() {
        let params = SessionParams::default();
        let mut v = view(&[], &params);
        v.error = Some("Rate limited");
        v.draft = "try again";
        let html = render_page(&v);
        assert!(html.contains(r#"<div class="error" role="alert">Rate limited</div>"#));
        assert!(html.contains(">try again</textarea>"));
    }

    #[test]
    fn empty_transcript_placeholder() {
        let params = SessionParams::default();
        let html = render_page(&view(&[], &params));
        assert!(html.contains("No messages yet."));
        assert!(html.contains("0 turn(s)"));
    }

    #[test]
    fn pending_page_refreshes() {
        let html = render_pending("Chat <1>");
        assert!(html.contains(r#"<meta http-equiv="refresh" content="2">"#));
        assert!(html.contains("<title>Chat &lt;1&gt;</title>"));
        assert!(html.contains("still being generated"));
    }

    #[test]
    fn notice_links_back() {
        let html = render_notice("ChatGPT", "busy <now>");
        assert!(html.contains("busy &lt;now&gt;"));
        assert!(html.contains(r#"href="/""#));
    }
}
