use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::campaign_builder::CampaignBuilder;
use crate::components::carousel::Carousel;
use crate::Route;

struct IndustryCard {
    key: &'static str,
    title: &'static str,
    blurb: &'static str,
}

const INDUSTRY_CARDS: [IndustryCard; 6] = [
    IndustryCard {
        key: "gaming",
        title: "Gaming",
        blurb: "User acquisition for mobile, PC and console titles, tuned for retention and payer rates.",
    },
    IndustryCard {
        key: "finance",
        title: "Finance",
        blurb: "Compliant acquisition funnels for fintech apps, brokers and lenders.",
    },
    IndustryCard {
        key: "crypto",
        title: "Crypto & Web3",
        blurb: "Exchange, wallet and protocol launches on the networks where crypto audiences live.",
    },
    IndustryCard {
        key: "realestate",
        title: "Real Estate",
        blurb: "Qualified buyer and renter leads for agencies, developers and listing platforms.",
    },
    IndustryCard {
        key: "ecommerce",
        title: "E-commerce",
        blurb: "Catalogue and shopping campaigns that scale ROAS across marketplaces and storefronts.",
    },
    IndustryCard {
        key: "saas",
        title: "SaaS",
        blurb: "Trial and demo pipelines measured on activated accounts, not clicks.",
    },
];

#[function_component(Landing)]
pub fn landing() -> Html {
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page">
            <style>
            {r#".hero { min-height: 70vh; display: flex; flex-direction: column; justify-content: center; padding: 6rem 1rem 3rem; max-width: 960px; margin: 0 auto; }
            .hero h1 { font-size: 3rem; margin-bottom: 1rem; }
            .industries { padding: 4rem 0; }
            .industries h2 { text-align: center; }
            .industries-snap {
                display: flex;
                gap: 1.25rem;
                overflow-x: auto;
                scroll-snap-type: x mandatory;
                padding: 1rem 25%;
                cursor: grab;
                outline: none;
            }
            .industries-snap.dragging { cursor: grabbing; scroll-snap-type: none; user-select: none; }
            .industry-card {
                flex: 0 0 min(320px, 80vw);
                scroll-snap-align: center;
                padding: 2rem;
                border-radius: 16px;
                background: rgba(255, 255, 255, 0.05);
                transition: transform 0.2s, box-shadow 0.2s;
            }
            .industry-card:hover { transform: translateY(-10px) scale(1.02); box-shadow: 0 0 30px rgba(74, 222, 128, 0.3); }
            .industry-card.active-slide { border: 1px solid #1E90FF; }
            .swipe-controls { display: flex; justify-content: center; gap: 1rem; margin-top: 1rem; }
            .swipe-prev, .swipe-next { width: 44px; height: 44px; border-radius: 50%; border: none; font-size: 1.5rem; cursor: pointer; }
            .cta { text-align: center; padding: 4rem 1rem; }"#}
            </style>
            <section class="hero">
                <h1>{"Performance marketing that outthinks the box."}</h1>
                <p>{"OOTB Media plans, buys and optimizes paid campaigns for brands that measure everything."}</p>
                <a href="#campaign-builder" class="btn-primary">{"See what we deliver"}</a>
            </section>
            <CampaignBuilder />
            <section class="industries" id="industries">
                <h2>{"Industries we scale"}</h2>
                <Carousel label="Industries">
                    { for INDUSTRY_CARDS.iter().map(|card| html! {
                        <article class="industry-card" data-industry={card.key}>
                            <h3>{ card.title }</h3>
                            <p>{ card.blurb }</p>
                        </article>
                    }) }
                </Carousel>
            </section>
            <section class="cta">
                <h2>{"Ready to launch your next campaign?"}</h2>
                <Link<Route> to={Route::Contact} classes="btn-primary">
                    {"Start a project"}
                </Link<Route>>
            </section>
        </div>
    }
}
