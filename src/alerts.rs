use std::io::Write;

#[derive(Clone, Debug)]
pub struct AlertConfig {
    pub bell: bool,
    pub notification: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bell: true,
            notification: true,
        }
    }
}

/// Ring the bell and raise a notice that holds input until it is dismissed.
pub fn fire_alert<W: Write>(
    config: &AlertConfig,
    out: &mut W,
    notice: &mut Option<String>,
    message: &str,
) {
    log::warn!("{}", message);
    if config.bell {
        out.write_all(b"\x07").ok();
        out.flush().ok();
    }
    if config.notification {
        *notice = Some(message.to_string());
    }
}
