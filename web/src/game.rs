use crate::feedback::BrowserFeedback;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use pairs_core as game;
use game::{Card, CardCount, CardState, Difficulty, Score, SoundSetting, Turn, WinSummary};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

type Session = game::GameSession<BrowserStore, BrowserFeedback>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(CardCount),
    Settle(game::SettleTicket),
    Tick,
    ShowSummary(game::RoundId),
    Restart,
    PlayAgain,
    ChangeDifficulty(Difficulty),
    ToggleSound,
}

fn card_classes(card: &Card, wrong: bool) -> Classes {
    let mut class = classes!(
        "card",
        match card.state {
            CardState::Hidden => classes!(),
            CardState::Revealed => classes!("flip"),
            CardState::Matched => classes!("flip", "match"),
        }
    );
    if wrong {
        class.push("shake");
    }
    class
}

fn best_labels(best: Option<Score>) -> (String, String) {
    match best {
        Some(Score { time, moves }) => (time.to_string(), moves.to_string()),
        None => ("--".to_string(), "--".to_string()),
    }
}

const fn sound_label(sound: SoundSetting) -> &'static str {
    match sound {
        SoundSetting::On => "🔊 Sound ON",
        SoundSetting::Off => "🔇 Sound OFF",
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: Card,
    #[prop_or_default]
    wrong: bool,
    callback: Callback<CardCount>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        wrong,
        callback,
    } = props.clone();

    let class = card_classes(&card, wrong);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.position);
        callback.emit(card.position);
    });

    html! {
        <div {class} {onclick}>
            <div class="front">{"?"}</div>
            <div class="back">{card.symbol.glyph()}</div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct SummaryProps {
    summary: WinSummary,
    onplayagain: Callback<MouseEvent>,
}

#[function_component(SummaryView)]
fn summary_component(props: &SummaryProps) -> Html {
    let WinSummary {
        score,
        best,
        is_new_best,
        ..
    } = props.summary;

    html! {
        <Modal>
            <dialog class="win-modal" open={true}>
                <article>
                    <h2>{"🎉 You Win!"}</h2>
                    <p>{"Time: "}<b>{score.time}</b>{"s"}</p>
                    <p>{"Moves: "}<b>{score.moves}</b></p>
                    <p>{"Best: "}<b>{best.time}</b>{"s / "}<b>{best.moves}</b>{" moves"}</p>
                    if is_new_best {
                        <p class="new-best">{"New best!"}</p>
                    }
                    <footer>
                        <button onclick={props.onplayagain.clone()}>{"Play Again"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first deal instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,

    /// Difficulty of the first round
    #[arg(short, long)]
    #[prop_or_default]
    difficulty: Option<Difficulty>,
}

/// Board plus everything scheduled against it. Dropping a timer handle cancels it.
#[derive(Debug)]
pub(crate) struct GameView {
    session: Session,
    summary_open: bool,
    pending_settle: Option<Timeout>,
    tick_interval: Option<Interval>,
    summary_timer: Option<Timeout>,
}

impl GameView {
    fn cancel_timers(&mut self) {
        self.pending_settle.take();
        self.tick_interval.take();
        self.summary_timer.take();
        self.summary_open = false;
    }

    /// Keeps the tick interval alive exactly while the round clock runs.
    fn sync_clock(&mut self, ctx: &Context<Self>) {
        if !self.session.clock().is_running() {
            self.tick_interval.take();
        } else if self.tick_interval.is_none() {
            let link = ctx.link().clone();
            self.tick_interval = Some(Interval::new(game::TICK_INTERVAL_MS, move || {
                link.send_message(Msg::Tick)
            }));
        }
    }

    fn flip(&mut self, ctx: &Context<Self>, index: CardCount) -> bool {
        let turn = match self.session.flip(index) {
            Ok(turn) => turn,
            Err(err) => {
                log::error!("flip {}: {}", index, err);
                return false;
            }
        };

        match turn {
            Turn::Mismatched(ticket) => {
                let link = ctx.link().clone();
                self.pending_settle = Some(Timeout::new(game::SETTLE_DELAY_MS, move || {
                    link.send_message(Msg::Settle(ticket))
                }));
            }
            Turn::Won(summary) => {
                log::info!(
                    "won {} in {}s with {} moves",
                    summary.difficulty,
                    summary.score.time,
                    summary.score.moves
                );
                let link = ctx.link().clone();
                let round = self.session.round();
                self.summary_timer = Some(Timeout::new(game::WIN_SUMMARY_DELAY_MS, move || {
                    link.send_message(Msg::ShowSummary(round))
                }));
            }
            Turn::Ignored(_) | Turn::Selected | Turn::Matched => {}
        }

        self.sync_clock(ctx);
        turn.has_update()
    }

    fn is_wrong(&self, index: CardCount) -> bool {
        self.session
            .engine()
            .pending_mismatch()
            .is_some_and(|pending| pending.first == index || pending.second == index)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let difficulty = props.difficulty.unwrap_or_default();
        let seed = props.seed.unwrap_or_else(js_random_seed);

        Self {
            session: Session::new(difficulty, seed, BrowserStore::new(), BrowserFeedback::new()),
            summary_open: false,
            pending_settle: None,
            tick_interval: None,
            summary_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(index) => self.flip(ctx, index),
            Settle(ticket) => {
                self.pending_settle.take();
                self.session.settle(ticket)
            }
            Tick => self.session.tick(),
            ShowSummary(round) => {
                self.summary_timer.take();
                let show = round == self.session.round() && self.session.summary().is_some();
                self.summary_open |= show;
                show
            }
            Restart | PlayAgain => {
                self.cancel_timers();
                self.session.restart(js_random_seed());
                true
            }
            ChangeDifficulty(difficulty) => {
                self.cancel_timers();
                self.session.set_difficulty(difficulty, js_random_seed());
                true
            }
            ToggleSound => {
                let sound = self.session.toggle_sound();
                log::debug!("sound {}", sound.as_str());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let state = self.session.round_state();
        let difficulty = self.session.difficulty();
        let (best_time, best_moves) = best_labels(self.session.best());
        let board_style = format!(
            "grid-template-columns: repeat({}, 1fr)",
            self.session.board().size
        );

        let cb_difficulty = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select.value().parse().ok().map(ChangeDifficulty)
        });
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);
        let cb_sound = ctx.link().callback(|_: MouseEvent| ToggleSound);
        let cb_play_again = ctx.link().callback(|_: MouseEvent| PlayAgain);
        let cb_flip = ctx.link().callback(Flip);

        html! {
            <div class="pairs">
                <header>
                    <select id="difficulty" onchange={cb_difficulty}>
                        {
                            for Difficulty::ALL.into_iter().map(|option| html! {
                                <option value={option.id()} selected={option == difficulty}>
                                    {option.label()}
                                </option>
                            })
                        }
                    </select>
                    <button id="restart" onclick={cb_restart}>{"🔄 Restart"}</button>
                    <button id="soundToggle" onclick={cb_sound}>{sound_label(self.session.sound())}</button>
                </header>
                <nav>
                    <span>{"⏱ "}<b id="time">{state.elapsed_secs}</b>{"s"}</span>
                    <span>{"Moves: "}<b id="moves">{state.moves}</b></span>
                    <span>{"Best: "}<b id="bestTime">{best_time}</b>{"s / "}<b id="bestMoves">{best_moves}</b></span>
                </nav>
                <div class={classes!("game-container", state.locked.then_some("locked"))} style={board_style}>
                    {
                        for self.session.cards().iter().map(|&card| {
                            let wrong = self.is_wrong(card.position);
                            let callback = cb_flip.clone();
                            html! {
                                <CardView key={card.position} {card} {wrong} {callback}/>
                            }
                        })
                    }
                </div>
                if let Some(summary) = self.session.summary().filter(|_| self.summary_open) {
                    <SummaryView {summary} onplayagain={cb_play_again}/>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::Symbol;

    fn card(state: CardState) -> Card {
        Card {
            state,
            ..Card::new(Symbol(0), 0)
        }
    }

    #[test]
    fn card_classes_follow_card_state() {
        let hidden = card_classes(&card(CardState::Hidden), false);
        assert!(hidden.contains("card"));
        assert!(!hidden.contains("flip"));

        let revealed = card_classes(&card(CardState::Revealed), true);
        assert!(revealed.contains("flip"));
        assert!(revealed.contains("shake"));
        assert!(!revealed.contains("match"));

        let matched = card_classes(&card(CardState::Matched), false);
        assert!(matched.contains("flip"));
        assert!(matched.contains("match"));
    }

    #[test]
    fn missing_best_shows_placeholders() {
        assert_eq!(best_labels(None), ("--".to_string(), "--".to_string()));
        assert_eq!(
            best_labels(Some(Score::new(42, 17))),
            ("42".to_string(), "17".to_string())
        );
    }

    #[test]
    fn sound_button_reflects_setting() {
        assert_eq!(sound_label(SoundSetting::On), "🔊 Sound ON");
        assert_eq!(sound_label(SoundSetting::Off), "🔇 Sound OFF");
    }
}
