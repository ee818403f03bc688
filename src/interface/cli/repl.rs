//! 생기부 도우미 대화형 쉘(REPL) 인터페이스.
//!
//! 입력 처리와 AI 보강 완료 처리를 하나의 루프에서 번갈아 수행한다.
//! 보강이 진행되는 동안에도 다른 행을 편집하거나 새로 생성할 수 있다.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Result, bail};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::application::ports::{Enricher, Reporter};
use crate::application::usecases::generate_row::TopicSettings;
use crate::application::usecases::lock_roster;
use crate::domain::activity::ActivitySource;
use crate::domain::compose::RandomSource;
use crate::domain::error::DraftError;
use crate::domain::phrase::Section;
use crate::domain::policy::PolishMode;
use crate::domain::roster::{EnrichOutcome, Roster, StudentId};
use crate::interface::cli::composition::{AppComposition, Workspace, random_source};

/// 대화형 입력으로 `/command`를 처리한다.
pub async fn run_repl(composition: &AppComposition, seed: Option<u64>) -> Result<()> {
    let workspace = composition.load_workspace()?;
    let enricher = match composition.enricher(&workspace.config) {
        Ok(enricher) => Some(enricher),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "enricher disabled");
            None
        }
    };
    print_welcome(composition, enricher.is_some());

    let rosters = Rosters::new(workspace.config.roster_size());
    let ctx = ReplContext {
        composition,
        workspace: &workspace,
        rosters: &rosters,
        enricher: enricher.as_deref(),
    };
    let mut session = Session::new(random_source(seed));
    let enrich_usecase = ctx.enricher.map(|e| composition.enrich_row_usecase(e));

    let mut in_flight: FuturesUnordered<Job<'_>> = FuturesUnordered::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt(session.section, in_flight.len())?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(raw_input) = line? else {
                    println!();
                    break;
                };
                let input = raw_input.trim();
                if input.is_empty() {
                    continue;
                }

                match parse_repl_command(input) {
                    Ok(ReplCommand::Exit) => break,
                    Ok(ReplCommand::Enrich { targets, mode }) => {
                        let Some(usecase) = enrich_usecase.as_ref() else {
                            eprintln!("error: {}", unavailable_hint());
                            continue;
                        };
                        let roster = rosters.get(session.section);
                        let ids = match resolve_targets(roster, &targets) {
                            Ok(ids) => ids,
                            Err(err) => {
                                eprintln!("error: {err}");
                                continue;
                            }
                        };
                        for id in ids {
                            in_flight.push(
                                async move { JobDone::Row(id, usecase.execute(roster, id, mode).await) }
                                    .boxed_local(),
                            );
                        }
                    }
                    Ok(ReplCommand::Images(ImagesArg::Run(instruction))) => {
                        match images_job(&ctx, &session, instruction) {
                            Ok(job) => in_flight.push(job),
                            Err(err) => eprintln!("error: {err:#}"),
                        }
                    }
                    Ok(cmd) => {
                        if let Err(err) = execute_command(&ctx, &mut session, cmd) {
                            eprintln!("error: {err:#}");
                        }
                    }
                    Err(msg) => {
                        eprintln!("error: {msg}");
                        eprintln!("hint: /help 로 명령 목록을 볼 수 있습니다");
                    }
                }
            }
            Some(done) = in_flight.next(), if !in_flight.is_empty() => {
                finish_job(done, &mut session, composition.reporter());
            }
        }
    }

    // 이미 보낸 요청은 취소하지 않고 응답까지 기다린다.
    if !in_flight.is_empty() {
        println!("진행 중인 AI 작업 {}건을 마무리합니다...", in_flight.len());
    }
    while let Some(done) = in_flight.next().await {
        finish_job(done, &mut session, composition.reporter());
    }
    Ok(())
}

/// 루프가 기다리는 원격 작업의 완료 결과.
enum JobDone {
    Row(StudentId, Result<Option<EnrichOutcome>>),
    Images(Result<String>),
}

type Job<'a> = LocalBoxFuture<'a, JobDone>;

/// 이미지 합성 작업을 만든다. 실행은 루프가 폴링할 때 진행된다.
fn images_job<'a>(
    ctx: &ReplContext<'a>,
    session: &Session,
    instruction: String,
) -> Result<Job<'a>> {
    let enricher = ctx.require_enricher()?;
    let composition = ctx.composition;
    let paths = session.images.clone();
    composition
        .reporter()
        .status("Images", "이미지 분석을 시작합니다. 다른 작업을 계속할 수 있습니다.");
    Ok(async move {
        let usecase = composition.synthesize_images_usecase(enricher);
        JobDone::Images(usecase.execute(&paths, &instruction).await)
    }
    .boxed_local())
}

fn finish_job(done: JobDone, session: &mut Session, reporter: &dyn Reporter) {
    match done {
        // 행 상태 보고는 유스케이스가 이미 했다.
        JobDone::Row(_, Ok(_)) => {}
        JobDone::Row(id, Err(err)) => eprintln!("error: {id}번: {err:#}"),
        JobDone::Images(Ok(text)) => {
            reporter.section("Result");
            reporter.raw(&text);
            reporter.status("Images", "/copy result 로 복사할 수 있습니다.");
            session.last_result = Some(text);
        }
        JobDone::Images(Err(err)) => eprintln!("error: {err:#}"),
    }
}

/// 영역별 명단. 보강 작업이 참조하는 동안 이동하지 않도록 루프 밖에서 소유한다.
struct Rosters {
    changche: Mutex<Roster>,
    seteuk: Mutex<Roster>,
    haengbal: Mutex<Roster>,
}

impl Rosters {
    fn new(size: usize) -> Self {
        Self {
            changche: Mutex::new(Roster::new(Section::Changche, size)),
            seteuk: Mutex::new(Roster::new(Section::Seteuk, size)),
            haengbal: Mutex::new(Roster::new(Section::Haengbal, size)),
        }
    }

    fn get(&self, section: Section) -> &Mutex<Roster> {
        match section {
            Section::Changche => &self.changche,
            Section::Seteuk => &self.seteuk,
            Section::Haengbal => &self.haengbal,
        }
    }
}

struct ReplContext<'a> {
    composition: &'a AppComposition,
    workspace: &'a Workspace,
    rosters: &'a Rosters,
    enricher: Option<&'a dyn Enricher>,
}

impl<'a> ReplContext<'a> {
    fn require_enricher(&self) -> Result<&'a dyn Enricher> {
        match self.enricher {
            Some(enricher) => Ok(enricher),
            None => bail!("{}", unavailable_hint()),
        }
    }
}

/// 탭 사이에서 공유되는 입력 상태.
struct Session {
    section: Section,
    grade: u8,
    semester: u8,
    activity: Option<ActivitySource>,
    topic: TopicSettings,
    images: Vec<PathBuf>,
    last_result: Option<String>,
    rng: Box<dyn RandomSource + Send>,
}

impl Session {
    fn new(rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            section: Section::Changche,
            grade: 1,
            semester: 1,
            activity: None,
            topic: TopicSettings::default(),
            images: Vec::new(),
            last_result: None,
            rng,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Targets {
    All,
    Rows(Vec<StudentId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StandardArg {
    On,
    Off,
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CopyTarget {
    Row(StudentId),
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImagesArg {
    List,
    Add(Vec<PathBuf>),
    Clear,
    Run(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Config,
    Tab(Section),
    Show(Option<StudentId>),
    Schedule { grade: Option<u8>, semester: Option<u8> },
    Activity(usize),
    Manual(String),
    Generate(Targets),
    Topic(StudentId, String),
    Common(String),
    Standard(StandardArg),
    Tag(StudentId, String),
    Tags,
    Note(StudentId, String),
    Edit(StudentId, String),
    Enrich { targets: Targets, mode: PolishMode },
    Copy(CopyTarget),
    Images(ImagesArg),
}

fn execute_command(
    ctx: &ReplContext<'_>,
    session: &mut Session,
    command: ReplCommand,
) -> Result<()> {
    let reporter = ctx.composition.reporter();
    let roster = ctx.rosters.get(session.section);

    match command {
        // 루프에서 직접 처리한다.
        ReplCommand::Exit | ReplCommand::Enrich { .. } | ReplCommand::Images(ImagesArg::Run(_)) => {}
        ReplCommand::Help => print_help(),
        ReplCommand::Config => {
            let json = ctx.composition.inspect_config_usecase().execute()?;
            println!("{json}");
        }
        ReplCommand::Tab(section) => {
            session.section = section;
            reporter.status("Tab", &format!("{} 탭으로 전환", section.label()));
        }
        ReplCommand::Show(id) => show_rows(ctx, session, id)?,
        ReplCommand::Schedule { grade, semester } => {
            if let Some(grade) = grade {
                session.grade = grade;
            }
            if let Some(semester) = semester {
                session.semester = semester;
            }
            show_schedule(ctx, session);
        }
        ReplCommand::Activity(number) => {
            let entry = ctx
                .workspace
                .schedule
                .pick(session.grade, session.semester, number)?;
            reporter.status("Activity", &format!("{} {}", entry.date, entry.name));
            session.activity = Some(ActivitySource::Catalog(entry));
        }
        ReplCommand::Manual(raw) => {
            let record = ActivitySource::Manual(raw.clone()).resolve()?;
            if let Some(notice) = record.date_notice() {
                reporter.notice(&notice.to_string());
            }
            reporter.status("Activity", &format!("{} / {}", record.date, record.name));
            session.activity = Some(ActivitySource::Manual(raw));
        }
        ReplCommand::Generate(targets) => {
            generate(ctx, session, roster, targets)?;
        }
        ReplCommand::Topic(id, topic) => {
            ensure_section(session, Section::Seteuk)?;
            lock_roster(roster).set_topic(id, &topic)?;
        }
        ReplCommand::Common(topic) => {
            session.topic.common_topic = topic.trim().to_string();
            reporter.kv("공통 주제", &session.topic.common_topic);
        }
        ReplCommand::Standard(arg) => {
            match arg {
                StandardArg::On => session.topic.include_standard = true,
                StandardArg::Off => session.topic.include_standard = false,
                StandardArg::Text(text) => {
                    session.topic.standard = text.trim().to_string();
                    session.topic.include_standard = !session.topic.standard.is_empty();
                }
            }
            reporter.kv("성취기준", &session.topic.standard);
            reporter.kv(
                "문구 포함",
                if session.topic.include_standard { "예" } else { "아니오" },
            );
        }
        ReplCommand::Tag(id, tag) => {
            let selected =
                lock_roster(roster).toggle_tag(id, &tag, ctx.workspace.composer.bank())?;
            let verb = if selected { "선택" } else { "해제" };
            reporter.row_status(id, verb, Some(&tag));
        }
        ReplCommand::Tags => show_tags(ctx, session.section),
        ReplCommand::Note(id, note) => {
            ensure_section(session, Section::Haengbal)?;
            lock_roster(roster).set_note(id, &note)?;
        }
        ReplCommand::Edit(id, text) => {
            lock_roster(roster).edit_text(id, &text)?;
            reporter.row(id, &text, lock_roster(roster).row(id)?.is_pending());
        }
        ReplCommand::Copy(target) => {
            let text = copy_source(session, roster, target)?;
            ctx.composition.copy_text_usecase().execute(&text)?;
        }
        ReplCommand::Images(arg) => manage_images(ctx, session, arg),
    }
    Ok(())
}

fn generate(
    ctx: &ReplContext<'_>,
    session: &mut Session,
    roster: &Mutex<Roster>,
    targets: Targets,
) -> Result<()> {
    let composer = &ctx.workspace.composer;
    let rng = session.rng.as_mut();

    match (session.section, targets) {
        (Section::Changche, Targets::All) => {
            ctx.composition
                .generate_batch_usecase(composer)
                .execute(roster, session.activity.as_ref(), rng)?;
        }
        (Section::Changche, Targets::Rows(_)) => {
            bail!("창체는 학급 전체로만 생성합니다. /generate 를 사용하세요.");
        }
        (_, Targets::All) => {
            let fill = ctx
                .composition
                .generate_row_usecase(composer)
                .execute_all(roster, &session.topic, rng);
            let reporter = ctx.composition.reporter();
            for (id, result) in fill.results {
                if let Err(err) = result {
                    reporter.row_status(id, "error", Some(&err.to_string()));
                }
            }
        }
        (_, Targets::Rows(ids)) => {
            let results = ctx
                .composition
                .generate_row_usecase(composer)
                .execute_rows(roster, &ids, &session.topic, rng);
            let reporter = ctx.composition.reporter();
            for (id, result) in results {
                match result {
                    Ok(text) => reporter.row(id, &text, false),
                    Err(err) => reporter.row_status(id, "error", Some(&err.to_string())),
                }
            }
        }
    }
    Ok(())
}

fn copy_source(session: &Session, roster: &Mutex<Roster>, target: CopyTarget) -> Result<String> {
    match target {
        CopyTarget::Row(id) => Ok(lock_roster(roster).row(id)?.text.clone()),
        CopyTarget::Result => match &session.last_result {
            Some(text) => Ok(text.clone()),
            None => bail!("복사할 결과가 없습니다. /images run 을 먼저 실행하세요."),
        },
    }
}

fn manage_images(ctx: &ReplContext<'_>, session: &mut Session, arg: ImagesArg) {
    let reporter = ctx.composition.reporter();
    match arg {
        ImagesArg::List => {
            if session.images.is_empty() {
                reporter.status("Images", "등록된 이미지가 없습니다.");
            }
            for (idx, path) in session.images.iter().enumerate() {
                reporter.kv(&format!("사진 {}", idx + 1), &path.display().to_string());
            }
        }
        ImagesArg::Add(paths) => {
            session.images.extend(paths);
            reporter.status("Images", &format!("{}장 등록됨", session.images.len()));
        }
        ImagesArg::Clear => {
            session.images.clear();
            reporter.status("Images", "목록을 비웠습니다.");
        }
        // 루프에서 작업으로 등록한다.
        ImagesArg::Run(_) => {}
    }
}

fn show_rows(ctx: &ReplContext<'_>, session: &Session, id: Option<StudentId>) -> Result<()> {
    let reporter = ctx.composition.reporter();
    let roster = lock_roster(ctx.rosters.get(session.section));

    if let Some(id) = id {
        let row = roster.row(id)?;
        reporter.section(&format!("{} {}번", session.section.label(), id));
        if session.section == Section::Seteuk {
            reporter.kv("주제", &row.topic);
        }
        if session.section != Section::Changche {
            reporter.kv("선택", &row.selections.join(", "));
        }
        if let Some(note) = &row.custom_note {
            reporter.kv("특성", note);
        }
        reporter.row(row.id, &row.text, row.is_pending());
        return Ok(());
    }

    reporter.section(&format!("{} ({}명)", session.section.label(), roster.len()));
    for row in roster.rows() {
        reporter.row(row.id, &row.text, row.is_pending());
    }
    Ok(())
}

fn show_schedule(ctx: &ReplContext<'_>, session: &Session) {
    let reporter = ctx.composition.reporter();
    reporter.section(&format!("{}학년 {}학기 학사일정", session.grade, session.semester));
    let entries = ctx
        .workspace
        .schedule
        .entries(session.grade, session.semester);
    if entries.is_empty() {
        reporter.notice(
            &DraftError::UnknownSchedule {
                grade: session.grade,
                semester: session.semester,
            }
            .to_string(),
        );
    }
    for (idx, entry) in entries.iter().enumerate() {
        reporter.kv(&format!("{}", idx + 1), &format!("{} {}", entry.date, entry.name));
    }
}

fn show_tags(ctx: &ReplContext<'_>, section: Section) {
    let bank = ctx.workspace.composer.bank();
    let reporter = ctx.composition.reporter();
    match section {
        Section::Seteuk => {
            reporter.section("역량 태그");
            reporter.raw(&bank.competency_tags().collect::<Vec<_>>().join(", "));
        }
        Section::Haengbal => {
            reporter.section("키워드 태그");
            reporter.raw(&bank.keyword_tags().collect::<Vec<_>>().join(", "));
        }
        Section::Changche => reporter.status("Tags", "창체 탭에는 태그가 없습니다."),
    }
}

fn ensure_section(session: &Session, expected: Section) -> Result<()> {
    if session.section != expected {
        bail!("{} 탭에서만 사용할 수 있습니다. /tab {}", expected.label(), expected.code());
    }
    Ok(())
}

/// `all`이면 문구가 있고 대기 중이 아닌 행만 고른다.
fn resolve_targets(roster: &Mutex<Roster>, targets: &Targets) -> Result<Vec<StudentId>, DraftError> {
    let guard = lock_roster(roster);
    match targets {
        Targets::All => Ok(guard
            .rows()
            .iter()
            .filter(|row| !row.text.is_empty() && !row.is_pending())
            .map(|row| row.id)
            .collect()),
        Targets::Rows(ids) => {
            for id in ids {
                guard.row(*id)?;
            }
            Ok(ids.clone())
        }
    }
}

fn unavailable_hint() -> String {
    "AI 기능을 쓰려면 GEMINI_API_KEY 또는 providers.gemini.api_key 설정이 필요합니다".to_string()
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    if !input.starts_with('/') {
        return Err("slash command only. example: /generate".to_string());
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((head, args)) = parts.split_first() else {
        return Err("empty command".to_string());
    };
    let rest = args.join(" ");

    match *head {
        "/exit" | "/quit" => Ok(ReplCommand::Exit),
        "/help" => Ok(ReplCommand::Help),
        "/config" => Ok(ReplCommand::Config),
        "/tab" => {
            let section = args
                .first()
                .and_then(|raw| Section::parse(raw))
                .ok_or("usage: /tab <changche|seteuk|haengbal>")?;
            Ok(ReplCommand::Tab(section))
        }
        "/show" => match args.first() {
            None => Ok(ReplCommand::Show(None)),
            Some(raw) => Ok(ReplCommand::Show(Some(parse_id(raw)?))),
        },
        "/schedule" => {
            let grade = args.first().map(|raw| parse_ranged(raw, 1, 3, "학년")).transpose()?;
            let semester = args.get(1).map(|raw| parse_ranged(raw, 1, 2, "학기")).transpose()?;
            Ok(ReplCommand::Schedule { grade, semester })
        }
        "/activity" => {
            let number = args
                .first()
                .and_then(|raw| raw.parse::<usize>().ok())
                .ok_or("usage: /activity <번호>")?;
            Ok(ReplCommand::Activity(number))
        }
        "/manual" => {
            if rest.is_empty() {
                return Err("usage: /manual <YYYY.MM.DD. 활동명>".to_string());
            }
            Ok(ReplCommand::Manual(rest))
        }
        "/generate" => parse_targets(args, false).map(ReplCommand::Generate),
        "/topic" => parse_id_text(args, "usage: /topic <번호> <주제>")
            .map(|(id, text)| ReplCommand::Topic(id, text)),
        "/common" => Ok(ReplCommand::Common(rest)),
        "/standard" => {
            let arg = match args {
                ["on"] => StandardArg::On,
                ["off"] => StandardArg::Off,
                _ => StandardArg::Text(rest),
            };
            Ok(ReplCommand::Standard(arg))
        }
        "/tag" => {
            let (id, tag) = parse_id_text(args, "usage: /tag <번호> <태그>")?;
            if tag.is_empty() {
                return Err("usage: /tag <번호> <태그>".to_string());
            }
            Ok(ReplCommand::Tag(id, tag))
        }
        "/tags" => Ok(ReplCommand::Tags),
        "/note" => parse_id_text(args, "usage: /note <번호> <특성>")
            .map(|(id, text)| ReplCommand::Note(id, text)),
        "/edit" => parse_id_text(args, "usage: /edit <번호> <문구>")
            .map(|(id, text)| ReplCommand::Edit(id, text)),
        "/enrich" | "/simplify" => {
            let mode = if *head == "/simplify" {
                PolishMode::Simplify
            } else {
                PolishMode::Enrich
            };
            let targets = parse_targets(args, true)?;
            Ok(ReplCommand::Enrich { targets, mode })
        }
        "/copy" => match args.first() {
            Some(&"result") => Ok(ReplCommand::Copy(CopyTarget::Result)),
            Some(raw) => Ok(ReplCommand::Copy(CopyTarget::Row(parse_id(raw)?))),
            None => Err("usage: /copy <번호|result>".to_string()),
        },
        "/images" => {
            let arg = match args.split_first() {
                None => ImagesArg::List,
                Some((&"clear", _)) => ImagesArg::Clear,
                Some((&"run", rest)) => ImagesArg::Run(rest.join(" ")),
                Some((&"add", paths)) if !paths.is_empty() => {
                    ImagesArg::Add(paths.iter().map(PathBuf::from).collect())
                }
                _ => return Err("usage: /images [add <경로...>|clear|run [요청사항]]".to_string()),
            };
            Ok(ReplCommand::Images(arg))
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_id(raw: &str) -> Result<StudentId, String> {
    raw.parse::<StudentId>()
        .map_err(|_| format!("학생 번호가 아닙니다: {raw}"))
}

fn parse_ranged(raw: &str, min: u8, max: u8, label: &str) -> Result<u8, String> {
    match raw.parse::<u8>() {
        Ok(value) if (min..=max).contains(&value) => Ok(value),
        _ => Err(format!("{label}은(는) {min}~{max} 사이여야 합니다: {raw}")),
    }
}

fn parse_id_text(args: &[&str], usage: &str) -> Result<(StudentId, String), String> {
    let Some((first, rest)) = args.split_first() else {
        return Err(usage.to_string());
    };
    Ok((parse_id(first)?, rest.join(" ")))
}

/// 인자가 없거나 `all`이면 전체. 보강은 번호를 명시해야 한다.
fn parse_targets(args: &[&str], require_explicit: bool) -> Result<Targets, String> {
    match args {
        [] if require_explicit => Err("usage: /enrich <번호...|all>".to_string()),
        [] | ["all"] => Ok(Targets::All),
        ids => ids
            .iter()
            .map(|raw| parse_id(raw))
            .collect::<Result<Vec<_>, _>>()
            .map(Targets::Rows),
    }
}

fn print_prompt(section: Section, pending: usize) -> Result<()> {
    if pending > 0 {
        print!("[{} · AI {pending}] > ", section.label());
    } else {
        print!("[{}] > ", section.label());
    }
    io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    let lines = [
        ("/tab <changche|seteuk|haengbal>", "영역 전환"),
        ("/show [번호]", "명단 또는 한 학생 보기"),
        ("/schedule [학년] [학기]", "학사일정 보기"),
        ("/activity <번호>", "학사일정에서 활동 선택"),
        ("/manual <YYYY.MM.DD. 활동>", "활동 직접 입력"),
        ("/generate [all|번호...]", "문구 생성"),
        ("/topic <번호> <주제>", "세특 개인 주제"),
        ("/common <주제>", "세특 공통 주제"),
        ("/standard <성취기준|on|off>", "세특 성취기준"),
        ("/tag <번호> <태그>", "역량/키워드 토글"),
        ("/tags", "선택 가능한 태그"),
        ("/note <번호> <특성>", "행발 기타 특성"),
        ("/edit <번호> <문구>", "문구 직접 수정"),
        ("/enrich <번호...|all>", "AI 풍성하게"),
        ("/simplify <번호...|all>", "AI 간결하게"),
        ("/copy <번호|result>", "클립보드 복사"),
        ("/images [add|clear|run]", "증빙 이미지로 특기사항 생성"),
        ("/config", "설정 점검"),
        ("/exit", "종료"),
    ];
    for (cmd, desc) in lines {
        println!("  {cmd:<34} {desc}");
    }
}

fn print_welcome(composition: &AppComposition, ai_ready: bool) {
    let interactive = io::stdout().is_terminal();
    if interactive {
        // 대화형 터미널에서는 시작 화면을 지우고 배너를 출력한다.
        print!("\x1b[2J\x1b[H");
    }

    let title = paint("생기부 도우미", "1;36", interactive);
    let subtitle = paint("창체 · 세특 · 행발 문구 작성", "2;37", interactive);

    println!("+------------------------------------------------------------+");
    println!("  {title}");
    println!("  {subtitle}");
    println!("+------------------------------------------------------------+");
    for line in build_startup_dashboard_lines(composition, ai_ready) {
        println!("  {}", fit_box_line(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!(
        "  {}  {}  {}",
        paint("/help", "1;33", interactive),
        paint("/generate", "1;32", interactive),
        paint("/exit", "1;31", interactive)
    );
    println!();
}

fn paint(text: &str, ansi: &str, interactive: bool) -> String {
    if interactive {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn build_startup_dashboard_lines(composition: &AppComposition, ai_ready: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let value: Value = match composition
        .inspect_config_usecase()
        .execute()
        .and_then(|raw| Ok(serde_json::from_str(&raw)?))
    {
        Ok(value) => value,
        Err(err) => {
            lines.push("Config: error".to_string());
            lines.push(format!("detail: {err}"));
            lines.push("hint: run `/config` to inspect and fix".to_string());
            return lines;
        }
    };

    let loaded_count = value
        .get("loaded_paths")
        .and_then(|v| v.as_array())
        .map(|arr| arr.len())
        .unwrap_or(0);
    lines.push(format!("Config: ok (loaded files: {loaded_count})"));

    let roster_size = value
        .pointer("/effective_defaults/roster_size")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let polish_mode = value
        .pointer("/effective_defaults/polish_mode")
        .and_then(|v| v.as_str())
        .unwrap_or("enrich");
    lines.push(format!("학생 수: {roster_size}명 / 윤문 기본값: {polish_mode}"));

    let model = value
        .pointer("/gemini/model")
        .and_then(|v| v.as_str())
        .unwrap_or("-");
    let state = if ai_ready { "ready" } else { "unavailable" };
    lines.push(format!("Gemini: {state} ({model})"));
    if !ai_ready {
        lines.push("  AI 없이도 문구 생성/편집/복사는 가능합니다".to_string());
    }
    lines
}

fn fit_box_line(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }
    let head: String = chars.into_iter().take(width - 3).collect();
    format!("{head}...")
}
