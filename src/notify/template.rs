//! # Confirmation Template
//!
//! Fixed HTML template for the reservation confirmation email. All
//! guest-supplied fields are escaped before interpolation.

/// Escape text for safe interpolation into HTML content
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render the confirmation email body
pub fn build_message(name: &str, date: &str, time: &str, guests: i64) -> String {
    let name = escape_html(name);
    let date = escape_html(date);
    let time = escape_html(time);

    format!(
        r#"
    <div style="font-family:Arial, sans-serif;padding:20px;background:#fff7fb;">
      <div style="max-width:540px;margin:auto;background:white;padding:20px;border-radius:12px;
                  border:1px solid #f3dae6;box-shadow:0 6px 24px rgba(0,0,0,0.07);">
        <h2 style="color:#ff5f95;margin:0 0 6px 0;font-size:24px;font-weight:700;">Babylon Reservation</h2>
        <p style="color:#4b3c40;font-size:15px;margin-top:14px;">
          Hi <b>{name}</b>,<br><br>
          Your reservation request has been received. Our team will confirm shortly.
        </p>

        <div style="margin-top:16px;padding:14px;background:#fff0f7;border-radius:10px;border:1px solid #f7d3e4;">
          <p style="margin:0;font-size:14px;color:#333;">
            <b>Date:</b> {date}<br>
            <b>Time:</b> {time}<br>
            <b>Guests:</b> {guests}
          </p>
        </div>

        <p style="color:#6d5a5f;font-size:14px;margin-top:18px;">
          Thank you for choosing Babylon.<br>
          <b>We look forward to hosting you.</b>
        </p>
      </div>
    </div>
    "#
    )
}
