use gloo_timers::callback::Timeout;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::campaign::kpi::{kpis_for, kpis_for_keys, Goal, Industry, Kpis};

const UPDATE_FLASH_MS: u32 = 150;

#[function_component(CampaignBuilder)]
pub fn campaign_builder() -> Html {
    let goal = use_state(|| Goal::Conversion);
    let industry = use_state(|| Industry::Gaming);
    let shown = use_state(|| kpis_for(Goal::Conversion, Industry::Gaming));
    let updating = use_state(|| false);
    // Replacing the pending timeout cancels the previous one.
    let pending = use_mut_ref(|| None::<Timeout>);

    let refresh = {
        let shown = shown.clone();
        let updating = updating.clone();
        let pending = pending.clone();
        Callback::from(move |next: Kpis| {
            updating.set(true);
            let shown = shown.clone();
            let updating = updating.clone();
            *pending.borrow_mut() = Some(Timeout::new(UPDATE_FLASH_MS, move || {
                shown.set(next);
                updating.set(false);
            }));
        })
    };

    let on_industry = {
        let goal = goal.clone();
        let industry = industry.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Some(selected) = Industry::from_key(&value) {
                industry.set(selected);
            }
            refresh.emit(kpis_for_keys(goal.key(), &value));
        })
    };

    let tile = |label: &'static str, value: &'static str| -> Html {
        html! {
            <div class={classes!("kpi-tile", (*updating).then(|| "updating"))}>
                <span class="kpi-label">{ label }</span>
                <span class="kpi-value">{ value }</span>
            </div>
        }
    };

    html! {
        <section class="campaign-builder" id="campaign-builder">
            <style>
            {r#".campaign-builder { padding: 4rem 1rem; max-width: 960px; margin: 0 auto; }
            .goal-buttons { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 1rem; }
            .goal-btn {
                padding: 0.6rem 1.2rem;
                border-radius: 999px;
                border: 1px solid rgba(126, 178, 255, 0.4);
                background: transparent;
                color: #fff;
                cursor: pointer;
            }
            .goal-btn.active { background: #1E90FF; border-color: #1E90FF; }
            .kpi-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; margin-top: 1.5rem; }
            .kpi-tile { padding: 1.25rem; border-radius: 12px; background: rgba(255, 255, 255, 0.05); transition: opacity 0.15s; }
            .kpi-tile.updating { opacity: 0.3; }
            .kpi-label { display: block; font-size: 0.85rem; color: rgba(255, 255, 255, 0.7); }
            .kpi-value { display: block; font-size: 1.8rem; font-weight: 700; }"#}
            </style>
            <h2>{"Build your campaign"}</h2>
            <p>{"Pick a goal and an industry to see the results we typically deliver."}</p>
            <div class="goal-buttons" role="group" aria-label="Campaign goal">
                { for Goal::ALL.into_iter().map(|candidate| {
                    let onclick = {
                        let goal = goal.clone();
                        let industry = industry.clone();
                        let refresh = refresh.clone();
                        Callback::from(move |_: MouseEvent| {
                            goal.set(candidate);
                            refresh.emit(kpis_for(candidate, *industry));
                        })
                    };
                    html! {
                        <button
                            class={classes!("goal-btn", (*goal == candidate).then(|| "active"))}
                            data-goal={candidate.key()}
                            {onclick}
                        >
                            { candidate.label() }
                        </button>
                    }
                }) }
            </div>
            <select id="industry-select" class="form-control" onchange={on_industry}>
                { for Industry::ALL.into_iter().map(|option| html! {
                    <option value={option.key()} selected={*industry == option}>{ option.label() }</option>
                }) }
            </select>
            <div class="kpi-grid">
                { tile("ROAS", shown.roas) }
                { tile("CTR", shown.ctr) }
                { tile("CPA", shown.cpa) }
                { tile("Conversion rate", shown.conversion) }
            </div>
        </section>
    }
}
