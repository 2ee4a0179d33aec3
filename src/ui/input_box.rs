/// URL submission form

use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::coordinator::submission_url;

#[derive(Properties, PartialEq)]
pub struct InputBoxProps {
    pub on_submit: Callback<String>,
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component(InputBox)]
pub fn input_box(props: &InputBoxProps) -> Html {
    let url = use_state(String::new);

    let on_input = {
        let url = url.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url.set(input.value());
            }
        })
    };

    // The field keeps its value after submit so the URL can be edited and re-sent
    let on_form_submit = {
        let url = url.clone();
        let on_submit = props.on_submit.clone();
        let is_loading = props.is_loading;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if is_loading {
                return;
            }
            if let Some(trimmed) = submission_url(&url) {
                on_submit.emit(trimmed.to_string());
            }
        })
    };

    let can_submit = submission_url(&url).is_some() && !props.is_loading;

    html! {
        <div class="input-card">
            <div class="input-header">
                <h1 class="main-title">{"VisionFlow"}</h1>
                <p class="subtitle">{"AI Workflow Automation Agent"}</p>
                <p class="hint">{"Extract structured data from any webpage using advanced AI"}</p>
            </div>

            <form onsubmit={on_form_submit} class="flex-column-gap">
                <input
                    type="url"
                    placeholder="Enter webpage URL (e.g., https://openai.com)"
                    value={(*url).clone()}
                    oninput={on_input}
                    disabled={props.is_loading}
                    class="url-input"
                />
                <button
                    type="submit"
                    class="pf-v5-c-button pf-m-primary pf-m-block"
                    disabled={!can_submit}
                >
                    if props.is_loading {
                        <Spinner />
                        <span class="button-label">{"Extracting Data..."}</span>
                    } else {
                        <span class="button-label">{"Extract Data"}</span>
                    }
                </button>
            </form>
        </div>
    }
}
