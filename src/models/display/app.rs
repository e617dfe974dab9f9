//! Application display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::client::Application;

/// Application display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppDisplay {
    /// Client ID
    #[tabled(rename = "CLIENT ID")]
    pub client_id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Application type (spa, native, regular_web, non_interactive)
    #[tabled(rename = "TYPE")]
    pub app_type: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Application> for AppDisplay {
    fn from(app: Application) -> Self {
        Self {
            client_id: app.client_id().to_string(),
            name: app.name().to_string(),
            app_type: or_dash(app.app_type.as_deref()),
            description: truncate_string(&or_dash(app.description.as_deref()), 40),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::ApplicationBuilder;

    #[test]
    fn test_app_display_from_application() {
        let app = ApplicationBuilder::new("billing-app")
            .client_id("cli_123")
            .app_type("spa")
            .description("Billing portal")
            .build();

        let display = AppDisplay::from(app);
        assert_eq!(display.client_id, "cli_123");
        assert_eq!(display.name, "billing-app");
        assert_eq!(display.app_type, "spa");
        assert_eq!(display.description, "Billing portal");
    }

    #[test]
    fn test_app_display_unset_fields() {
        let display = AppDisplay::from(ApplicationBuilder::new("bare").build());
        assert_eq!(display.client_id, "");
        assert_eq!(display.app_type, "-");
        assert_eq!(display.description, "-");
    }
}
