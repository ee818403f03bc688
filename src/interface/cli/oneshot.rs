//! 서브커맨드 단발 실행.

use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use tracing::warn;

use crate::application::config::Config;
use crate::application::ports::Enricher;
use crate::application::usecases::generate_row::TopicSettings;
use crate::application::usecases::lock_roster;
use crate::domain::activity::ActivitySource;
use crate::domain::error::DraftError;
use crate::domain::phrase::Section;
use crate::domain::roster::Roster;
use crate::interface::cli::command::{
    ChangcheOptions, CliAction, HaengbalOptions, ImagesOptions, SeteukOptions,
};
use crate::interface::cli::composition::{AppComposition, Workspace, random_source};
use crate::interface::cli::repl::run_repl;

/// 파싱된 동작 하나를 실행한다.
pub async fn run_action(
    composition: &AppComposition,
    seed: Option<u64>,
    action: CliAction,
) -> Result<()> {
    match action {
        CliAction::Interactive => run_repl(composition, seed).await,
        CliAction::InspectConfig => {
            let json = composition.inspect_config_usecase().execute()?;
            println!("{json}");
            Ok(())
        }
        CliAction::Changche(options) => run_changche(composition, seed, options).await,
        CliAction::Seteuk(options) => run_seteuk(composition, seed, options).await,
        CliAction::Haengbal(options) => run_haengbal(composition, seed, options).await,
        CliAction::Images(options) => run_images(composition, options).await,
        CliAction::Polish { text, mode } => {
            let workspace = composition.load_workspace()?;
            let enricher = composition.enricher(&workspace.config)?;
            let polished = composition
                .polish_text_usecase(enricher.as_ref())
                .execute(&text, mode)
                .await?;
            composition.reporter().raw(&polished);
            Ok(())
        }
        CliAction::Schedule { grade, semester } => {
            let workspace = composition.load_workspace()?;
            let entries = workspace.schedule.entries(grade, semester);
            if entries.is_empty() {
                return Err(DraftError::UnknownSchedule { grade, semester }.into());
            }
            let reporter = composition.reporter();
            reporter.section(&format!("{grade}학년 {semester}학기 학사일정"));
            for (idx, entry) in entries.iter().enumerate() {
                reporter.kv(&format!("{}", idx + 1), &format!("{} {}", entry.date, entry.name));
            }
            Ok(())
        }
        CliAction::Phrases => {
            let workspace = composition.load_workspace()?;
            let bank = workspace.composer.bank();
            let reporter = composition.reporter();
            reporter.section("세특 역량");
            reporter.raw(&bank.competency_tags().collect::<Vec<_>>().join(", "));
            reporter.section("행발 키워드");
            reporter.raw(&bank.keyword_tags().collect::<Vec<_>>().join(", "));
            Ok(())
        }
    }
}

async fn run_changche(
    composition: &AppComposition,
    seed: Option<u64>,
    options: ChangcheOptions,
) -> Result<()> {
    let workspace = composition.load_workspace()?;
    let size = options
        .count
        .unwrap_or_else(|| workspace.config.roster_size());
    let source = match (options.pick, options.manual) {
        (_, Some(raw)) => ActivitySource::Manual(raw),
        (Some(number), None) => ActivitySource::Catalog(workspace.schedule.pick(
            options.grade,
            options.semester,
            number,
        )?),
        (None, None) => bail!("--pick <번호> 또는 --manual <활동>이 필요합니다"),
    };

    let roster = Mutex::new(Roster::new(Section::Changche, size));
    let mut rng = random_source(seed);
    composition
        .generate_batch_usecase(&workspace.composer)
        .execute(&roster, Some(&source), rng.as_mut())?;

    finish(composition, &workspace, &roster, options.enrich).await
}

async fn run_seteuk(
    composition: &AppComposition,
    seed: Option<u64>,
    options: SeteukOptions,
) -> Result<()> {
    let workspace = composition.load_workspace()?;
    let roster = Mutex::new(Roster::new(Section::Seteuk, options.count));
    apply_tags(&workspace, &roster, &options.competencies)?;

    let settings = TopicSettings {
        common_topic: options.topic,
        standard: options.standard.unwrap_or_default(),
        include_standard: options.include_standard,
    };
    generate_rows(composition, &workspace, &roster, &settings, seed)?;
    finish(composition, &workspace, &roster, options.enrich).await
}

async fn run_haengbal(
    composition: &AppComposition,
    seed: Option<u64>,
    options: HaengbalOptions,
) -> Result<()> {
    let workspace = composition.load_workspace()?;
    let roster = Mutex::new(Roster::new(Section::Haengbal, options.count));
    apply_tags(&workspace, &roster, &options.keywords)?;
    if let Some(note) = &options.note {
        let mut guard = lock_roster(&roster);
        for id in 1..=options.count as u32 {
            guard.set_note(id, note)?;
        }
    }

    generate_rows(composition, &workspace, &roster, &TopicSettings::default(), seed)?;
    finish(composition, &workspace, &roster, options.enrich).await
}

async fn run_images(composition: &AppComposition, options: ImagesOptions) -> Result<()> {
    let workspace = composition.load_workspace()?;
    let enricher = composition.enricher(&workspace.config)?;
    let text = composition
        .synthesize_images_usecase(enricher.as_ref())
        .execute(&options.paths, &options.instruction)
        .await?;
    if options.copy {
        composition.copy_text_usecase().execute(&text)?;
    } else {
        composition.reporter().section("Result");
        composition.reporter().raw(&text);
    }
    Ok(())
}

/// 모든 행에 같은 태그를 선택 순서대로 적용한다.
/// 같은 태그가 반복되면 처음 나온 것만 쓴다. 토글이라 두 번 적용하면 선택이 풀린다.
fn apply_tags(workspace: &Workspace, roster: &Mutex<Roster>, tags: &[String]) -> Result<()> {
    let bank = workspace.composer.bank();
    let mut unique: Vec<&String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }

    let mut guard = lock_roster(roster);
    let ids: Vec<u32> = guard.rows().iter().map(|row| row.id).collect();
    for id in ids {
        for tag in &unique {
            guard.toggle_tag(id, tag, bank)?;
        }
    }
    Ok(())
}

fn generate_rows(
    composition: &AppComposition,
    workspace: &Workspace,
    roster: &Mutex<Roster>,
    settings: &TopicSettings,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = random_source(seed);
    let fill = composition
        .generate_row_usecase(&workspace.composer)
        .execute_all(roster, settings, rng.as_mut());
    // 단발 실행에서는 모든 행이 같은 입력이므로 첫 실패가 곧 전체 실패다.
    if let Some((_, Err(err))) = fill.results.into_iter().find(|(_, result)| result.is_err()) {
        return Err(err.into());
    }
    Ok(())
}

async fn finish(
    composition: &AppComposition,
    workspace: &Workspace,
    roster: &Mutex<Roster>,
    enrich: bool,
) -> Result<()> {
    let enricher = if enrich {
        optional_enricher(composition, &workspace.config)
    } else {
        None
    };
    if let Some(enricher) = enricher {
        let ids: Vec<u32> = lock_roster(roster).rows().iter().map(|row| row.id).collect();
        let results = composition
            .enrich_row_usecase(enricher.as_ref())
            .execute_many(roster, &ids, workspace.config.polish_mode())
            .await;
        for (id, result) in results {
            if let Err(err) = result {
                composition
                    .reporter()
                    .row_status(id, "error", Some(&format!("{err:#}")));
            }
        }
    }

    let reporter = composition.reporter();
    let guard = lock_roster(roster);
    reporter.section(&format!("{} ({}명)", guard.section().label(), guard.len()));
    for row in guard.rows() {
        reporter.row(row.id, &row.text, row.is_pending());
    }
    Ok(())
}

/// AI 보강을 쓸 수 없으면 안내만 남기고 초안 출력으로 넘어간다.
fn optional_enricher(composition: &AppComposition, config: &Config) -> Option<Arc<dyn Enricher>> {
    match composition.enricher(config) {
        Ok(enricher) => Some(enricher),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "enrichment skipped");
            composition
                .reporter()
                .notice(&format!("AI 보강 없이 초안을 출력합니다: {err:#}"));
            None
        }
    }
}
