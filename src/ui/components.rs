/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::lifecycle::BackendStatus;

#[derive(PartialEq, Clone, Copy)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Properties, PartialEq)]
pub struct MessageBannerProps {
    pub kind: BannerKind,
    pub message: String,
    pub on_dismiss: Callback<()>,
}

/// Status message that stays until the user dismisses it
#[function_component(MessageBanner)]
pub fn message_banner(props: &MessageBannerProps) -> Html {
    let (alert_type, title) = match props.kind {
        BannerKind::Success => (AlertType::Success, "Extraction Successful"),
        BannerKind::Error => (AlertType::Danger, "Extraction Failed"),
    };

    html! {
        <div class="message-top-margin">
            <Alert r#type={alert_type} title={title} inline={true}>
                <p class="message-paragraph">{&props.message}</p>
                <Button
                    onclick={props.on_dismiss.reform(|_| ())}
                    variant={ButtonVariant::Secondary}
                >
                    {"Dismiss"}
                </Button>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: BackendStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let (class, label) = match &props.status {
        BackendStatus::Unknown => ("status-badge status-unknown", "Connecting".to_string()),
        BackendStatus::Online { version } if version.is_empty() => {
            ("status-badge status-online", "Live".to_string())
        }
        BackendStatus::Online { version } => {
            ("status-badge status-online", format!("Live • v{}", version))
        }
        BackendStatus::Offline => ("status-badge status-offline", "Offline".to_string()),
    };

    html! {
        <span class={class}>
            <span class="status-dot"></span>
            {label}
        </span>
    }
}
