/// Root component: owns shared state and wires the coordinator to the view

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::coordinator::Coordinator;
use crate::lifecycle::UiState;
use crate::ui::components::{BannerKind, MessageBanner, StatusBadge};
use crate::ui::data_table::DataTable;
use crate::ui::input_box::InputBox;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    #[prop_or_default]
    pub config: ApiConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let state = use_reducer(UiState::default);

    let coordinator = {
        let dispatcher = state.dispatcher();
        let config = props.config.clone();
        use_memo((), move |_| {
            let retry = config.retry;
            Coordinator::new(ApiClient::new(config), retry, move |action| {
                dispatcher.dispatch(action)
            })
        })
    };

    // Initial load, health probe and polling on mount; all stop on unmount
    {
        let coordinator = coordinator.clone();
        let poll_interval_ms = props.config.poll_interval_ms;

        use_effect_with((), move |_| {
            let loader = (*coordinator).clone();
            spawn_local(async move {
                loader.initial_load(TimeoutFuture::new).await;
            });

            let probe = (*coordinator).clone();
            spawn_local(async move {
                probe.check_backend().await;
            });

            let polling = coordinator.start_polling(poll_interval_ms);

            move || {
                coordinator.shutdown();
                drop(polling);
            }
        });
    }

    let on_submit = {
        let coordinator = coordinator.clone();
        Callback::from(move |url: String| {
            let coordinator = (*coordinator).clone();
            spawn_local(async move {
                coordinator.submit(&url).await;
            });
        })
    };

    let on_dismiss = {
        let coordinator = coordinator.clone();
        Callback::from(move |()| coordinator.dismiss())
    };

    html! {
        <div class="container">
            <div class="header">
                <span class="brand">{"VisionFlow Demo"}</span>
                <StatusBadge status={state.backend.clone()} />
            </div>

            if let Some(error) = state.error.clone() {
                <MessageBanner kind={BannerKind::Error} message={error} on_dismiss={on_dismiss.clone()} />
            }

            if let Some(message) = state.success_message.clone() {
                <MessageBanner kind={BannerKind::Success} message={message} on_dismiss={on_dismiss.clone()} />
            }

            <div class="content-stack">
                <InputBox on_submit={on_submit} is_loading={state.is_submitting} />
                <DataTable records={state.records.clone()} is_loading={state.is_initial_loading()} />
            </div>

            <p class="footer">
                {"VisionFlow Web v0.1.0"}
            </p>
        </div>
    }
}
