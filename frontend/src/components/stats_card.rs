use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("bg-blue-500"))]
    pub bg_color: AttrValue,
}

#[function_component(StatsCard)]
pub fn stats_card(props: &StatsCardProps) -> Html {
    html! {
        <div class={format!("rounded-lg shadow-lg overflow-hidden {}", props.bg_color)}>
            <div class="px-4 py-5 sm:p-6">
                <dl>
                    <dt class="text-sm font-medium truncate text-white opacity-80">{ &props.title }</dt>
                    <dd class="text-lg font-bold text-white">{ &props.value }</dd>
                </dl>
            </div>
        </div>
    }
}
