#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};
use std::time::Duration;

use leptos::leptos_dom::helpers::{
    IntervalHandle, TimeoutHandle, set_interval_with_handle, set_timeout_with_handle,
};
use leptos::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::{
    ElementField, ElementRecord, ElementRepository, OverlayStore, QuizPhase, QuizSession,
    QuizSettings, QuizSummary, Scheduler, SelectionFilter, StoreError, TimerBand, TimerEvent,
    builtin_elements, category_label,
};

/// Overlay persistence in `window.localStorage`.
struct LocalStorageStore;

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    leptos::window()
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))
}

impl OverlayStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable(format!("cannot read {}", key)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable(format!("cannot write {}", key)))
    }
}

/// Browser timers feeding events back into the quiz held by `target`.
struct BrowserScheduler {
    target: Weak<RefCell<Option<BrowserQuiz>>>,
    revision: RwSignal<u64>,
    countdown: Option<IntervalHandle>,
    advance: Option<TimeoutHandle>,
}

type BrowserQuiz = QuizSession<StdRng, BrowserScheduler>;
type QuizHandle = Rc<RefCell<Option<BrowserQuiz>>>;

fn deliver(target: &Weak<RefCell<Option<BrowserQuiz>>>, revision: RwSignal<u64>, event: TimerEvent) {
    let Some(cell) = target.upgrade() else { return };
    if let Some(session) = cell.borrow_mut().as_mut() {
        session.dispatch(event);
    }
    revision.update(|value| *value += 1);
}

impl Scheduler for BrowserScheduler {
    fn start_countdown(&mut self, period: Duration) {
        self.stop_countdown();
        let target = self.target.clone();
        let revision = self.revision;
        self.countdown = set_interval_with_handle(
            move || deliver(&target, revision, TimerEvent::Tick),
            period,
        )
        .ok();
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.clear();
        }
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.cancel_advance();
        let target = self.target.clone();
        let revision = self.revision;
        self.advance = set_timeout_with_handle(
            move || deliver(&target, revision, TimerEvent::Advance),
            delay,
        )
        .ok();
    }

    fn cancel_advance(&mut self) {
        if let Some(handle) = self.advance.take() {
            handle.clear();
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        self.stop_countdown();
        self.cancel_advance();
    }
}

/// Plain copy of what the quiz modal draws, taken so no borrow outlives a render.
struct QuizSnapshot {
    phase: QuizPhase,
    index: usize,
    total: usize,
    score: u32,
    remaining: u32,
    budget: u32,
    band: TimerBand,
    prompt: String,
    options: Vec<String>,
    correct: String,
    selected: Option<String>,
    locked: bool,
    summary: Option<QuizSummary>,
}

impl QuizSnapshot {
    fn capture(session: &BrowserQuiz) -> Self {
        let question = session.question();
        Self {
            phase: session.phase(),
            index: session.index(),
            total: session.total(),
            score: session.score(),
            remaining: session.time_remaining(),
            budget: session.settings().question_seconds.max(1),
            band: session.timer_band(),
            prompt: question.map(|q| q.prompt().to_string()).unwrap_or_default(),
            options: question.map(|q| q.options.clone()).unwrap_or_default(),
            correct: question
                .map(|q| q.correct_label().to_string())
                .unwrap_or_default(),
            selected: session.selected_answer().map(str::to_string),
            locked: session.is_locked(),
            summary: session.summary(),
        }
    }
}

fn band_class(band: TimerBand) -> &'static str {
    match band {
        TimerBand::Plenty => "timer-bar plenty",
        TimerBand::Low => "timer-bar low",
        TimerBand::Critical => "timer-bar critical",
    }
}

fn open_quiz(quiz: &QuizHandle, elements: Vec<ElementRecord>, revision: RwSignal<u64>) {
    close_quiz(quiz);
    let scheduler = BrowserScheduler {
        target: Rc::downgrade(quiz),
        revision,
        countdown: None,
        advance: None,
    };
    let session = QuizSession::start(
        elements,
        StdRng::from_entropy(),
        scheduler,
        QuizSettings::default(),
    );
    *quiz.borrow_mut() = Some(session);
    revision.update(|value| *value += 1);
}

fn close_quiz(quiz: &QuizHandle) {
    if let Some(session) = quiz.borrow_mut().take() {
        drop(session.close());
    }
}

fn with_quiz(quiz: &QuizHandle, revision: RwSignal<u64>, action: impl FnOnce(&mut BrowserQuiz)) {
    if let Some(session) = quiz.borrow_mut().as_mut() {
        action(session);
    }
    revision.update(|value| *value += 1);
}

fn render_quiz(quiz: &QuizHandle, revision: RwSignal<u64>) -> View {
    let Some(snapshot) = quiz.borrow().as_ref().map(QuizSnapshot::capture) else {
        return ().into_view();
    };

    let close = {
        let quiz = quiz.clone();
        move |_| {
            close_quiz(&quiz);
            revision.update(|value| *value += 1);
        }
    };

    match snapshot.phase {
        QuizPhase::Loading => view! {
            <div class="modal-backdrop">
                <section class="modal quiz">
                    <h2>"오류"</h2>
                    <p>"원소 데이터를 불러올 수 없습니다."</p>
                    <button class="secondary" on:click=close>"닫기"</button>
                </section>
            </div>
        }
        .into_view(),
        QuizPhase::Finished => {
            let summary = snapshot.summary.unwrap_or(QuizSummary::new(0, 0));
            let restart = {
                let quiz = quiz.clone();
                move |_| {
                    with_quiz(&quiz, revision, |session| {
                        if let Err(error) = session.restart() {
                            log::warn!("restart refused: {}", error);
                        }
                    })
                }
            };

            view! {
                <div class="modal-backdrop">
                    <section class="modal quiz result">
                        <h2>"퀴즈 결과"</h2>
                        <p class="score">{summary.score}</p>
                        <p>{format!("{}문제 중 {}문제 정답", summary.attempted, summary.score)}</p>
                        <p class="percentage">{format!("정답률: {}%", summary.percentage)}</p>
                        <div class="actions">
                            <button class="primary" on:click=restart>"다시 시작"</button>
                            <button class="secondary" on:click=close>"닫기"</button>
                        </div>
                    </section>
                </div>
            }
            .into_view()
        }
        QuizPhase::InProgress | QuizPhase::AnswerRevealed => {
            let exit = {
                let quiz = quiz.clone();
                move |_| {
                    with_quiz(&quiz, revision, |session| {
                        session.exit();
                    })
                }
            };
            let width = snapshot.remaining * 100 / snapshot.budget;

            let options = snapshot
                .options
                .iter()
                .map(|option| {
                    let status = if !snapshot.locked {
                        "option"
                    } else if *option == snapshot.correct {
                        "option correct"
                    } else if snapshot.selected.as_deref() == Some(option.as_str()) {
                        "option wrong"
                    } else {
                        "option muted"
                    };
                    let quiz = quiz.clone();
                    let label = option.clone();
                    view! {
                        <button
                            class=status
                            disabled=snapshot.locked
                            on:click=move |_| {
                                with_quiz(&quiz, revision, |session| {
                                    session.submit_answer(Some(&label));
                                })
                            }
                        >
                            {option.clone()}
                        </button>
                    }
                })
                .collect_view();

            view! {
                <div class="modal-backdrop">
                    <section class="modal quiz">
                        <header class="quiz-header">
                            <span>{format!("문제 {} / {}", snapshot.index + 1, snapshot.total)}</span>
                            <span>{format!("점수: {}", snapshot.score)}</span>
                            <button class="icon" on:click=exit>"✕"</button>
                        </header>
                        <div class="timer">
                            <p class="label">"남은 시간"</p>
                            <div class="timer-track">
                                <div class=band_class(snapshot.band) style=format!("width: {}%", width)></div>
                            </div>
                            <p class="seconds">{format!("{}초", snapshot.remaining)}</p>
                        </div>
                        <p class="eyebrow">"이 원소의 이름은?"</p>
                        <p class="prompt">{snapshot.prompt.clone()}</p>
                        <div class="options">{options}</div>
                    </section>
                </div>
            }
            .into_view()
        }
    }
}

#[component]
fn ElementDetail(
    element: ElementRecord,
    edited: bool,
    selection: RwSignal<Option<ElementRecord>>,
    repository: Rc<RefCell<ElementRepository<LocalStorageStore>>>,
    effective: RwSignal<Vec<ElementRecord>>,
    edited_numbers: RwSignal<BTreeSet<u32>>,
) -> impl IntoView {
    let editing = create_rw_signal(false);
    let drafts: Vec<(ElementField, RwSignal<String>)> = ElementField::ALL
        .into_iter()
        .map(|field| (field, create_rw_signal(element.field_text(field))))
        .collect();

    let save = {
        let element = element.clone();
        let drafts = drafts.clone();
        move |_| {
            let record = drafts
                .iter()
                .fold(element.clone(), |record, (field, draft)| {
                    record.with_field(*field, &draft.get_untracked())
                });

            let list = repository.borrow_mut().save_edit(record.clone());
            edited_numbers.set(repository.borrow().edited_numbers());
            effective.set(list);
            selection.set(Some(record));
            editing.set(false);
        }
    };

    let form = drafts
        .iter()
        .map(|(field, draft)| {
            let draft = *draft;
            view! {
                <label class="field">
                    <span>{field.key()}</span>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                </label>
            }
        })
        .collect_view();

    let facts = vec![
        ("상태", element.phase.clone()),
        ("발견자", element.discoverer_label().to_string()),
        ("밀도", element.density_label()),
        ("녹는점", element.melt_label()),
        ("끓는점", element.boil_label()),
        ("전자 배치", element.electron_configuration.clone()),
    ]
    .into_iter()
    .map(|(label, value)| {
        view! {
            <div class="fact">
                <span class="fact-label">{label}</span>
                <span class="fact-value">{value}</span>
            </div>
        }
    })
    .collect_view();

    view! {
        <div class="modal-backdrop">
            <section class="modal detail">
                <button class="icon close" on:click=move |_| selection.set(None)>"✕"</button>
                <div class="badge-tile">
                    <span class="number">{element.number}</span>
                    <span class="symbol">{element.symbol.clone()}</span>
                    <span class="mass">{element.mass_label()}</span>
                </div>
                <p class="category">{category_label(element.category)}</p>
                <h2>{element.name_ko.clone()}</h2>
                <p class="english">{element.name.clone()}</p>
                {edited.then(|| view! { <p class="edited">"편집됨"</p> })}
                <p class="summary">{element.summary_text().to_string()}</p>
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <button class="secondary" on:click=move |_| editing.set(true)>"편집"</button>
                    }
                >
                    <div class="edit-form">{form.clone()}</div>
                    <button class="primary" on:click=save.clone()>"저장"</button>
                </Show>
                <div class="facts">{facts}</div>
                <a href=element.source.clone() target="_blank" rel="noopener noreferrer">
                    "위키백과에서 더 보기 →"
                </a>
            </section>
        </div>
    }
}

#[component]
fn App() -> impl IntoView {
    let repository = Rc::new(RefCell::new(ElementRepository::open(
        builtin_elements(),
        LocalStorageStore,
    )));
    let effective = create_rw_signal(repository.borrow().effective());
    let edited_numbers = create_rw_signal(repository.borrow().edited_numbers());
    let query = create_rw_signal(String::new());
    let selection = create_rw_signal::<Option<ElementRecord>>(None);
    let quiz: QuizHandle = Rc::new(RefCell::new(None));
    let revision = create_rw_signal(0u64);

    let tiles = move || {
        let mut filter = SelectionFilter::new();
        filter.set_query(query.get());
        filter.tiles(&effective.get(), &edited_numbers.get())
    };

    let grid = move || {
        tiles()
            .into_iter()
            .map(|tile| {
                let number = tile.number;
                let mut class = format!("tile {}", tile.category.tag());
                if tile.dimmed {
                    class.push_str(" dimmed");
                }
                view! {
                    <button
                        class=class
                        style=format!("grid-column: {}; grid-row: {};", tile.column, tile.row)
                        on:click=move |_| {
                            let record = effective
                                .get_untracked()
                                .into_iter()
                                .find(|record| record.number == number);
                            selection.set(record);
                        }
                    >
                        {tile.edited.then(|| view! { <span class="edited-dot" title="편집됨"></span> })}
                        <span class="tile-number">{tile.number}</span>
                        <span class="tile-symbol">{tile.symbol}</span>
                        <span class="tile-name">{tile.name_ko}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let start_quiz = {
        let quiz = quiz.clone();
        move |_| open_quiz(&quiz, effective.get_untracked(), revision)
    };

    let reset = {
        let repository = repository.clone();
        move |_| {
            let list = repository.borrow_mut().reset_overlay();
            edited_numbers.set(BTreeSet::new());
            let mut filter = SelectionFilter::new();
            if let Some(current) = selection.get_untracked() {
                filter.select(current);
                filter.refresh(&list);
                selection.set(filter.selected().cloned());
            }
            effective.set(list);
        }
    };

    let detail = {
        let repository = repository.clone();
        move || {
            selection.get().map(|element| {
                let edited = edited_numbers.get().contains(&element.number);
                view! {
                    <ElementDetail
                        element=element
                        edited=edited
                        selection=selection
                        repository=repository.clone()
                        effective=effective
                        edited_numbers=edited_numbers
                    />
                }
            })
        }
    };

    let quiz_modal = move || {
        revision.get();
        render_quiz(&quiz, revision)
    };

    view! {
        <main class="page">
            <header class="page-header">
                <h1 class="headline">"주기율표 학습 도우미"</h1>
                <p class="lede">"원소를 클릭하여 상세 정보를 확인하고 화학의 기초를 다져보세요."</p>
                <input
                    class="search"
                    type="text"
                    placeholder="원소 이름이나 기호 검색..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <div class="header-actions">
                    <button class="primary" on:click=start_quiz>"퀴즈 시작"</button>
                    <button class="pill" on:click=reset>"편집 초기화"</button>
                </div>
            </header>
            <section class="grid">{grid}</section>
            {detail}
            {quiz_modal}
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App /> });
}
