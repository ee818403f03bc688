//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::policy::PolishMode;

#[derive(Debug, Parser)]
#[command(name = "saenggibu")]
#[command(about = "생기부(창체/세특/행발) 문구 작성 도우미")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 난수 시드(같은 시드면 같은 문구가 생성됨)
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 창체: 학사일정 또는 직접 입력한 활동으로 학급 전체 문구 생성
    Changche {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
        grade: u8,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        semester: u8,
        /// 학사일정 번호(1부터)
        #[arg(long, conflicts_with = "manual")]
        pick: Option<usize>,
        /// 직접 입력 (예: "2025.05.05. 체육대회")
        #[arg(long)]
        manual: Option<String>,
        /// 생성할 학생 수(기본: 설정의 roster_size)
        #[arg(long)]
        count: Option<usize>,
        /// 생성 후 모든 문구를 AI로 윤문
        #[arg(long)]
        enrich: bool,
    },
    /// 세특: 주제와 역량으로 문구 생성
    Seteuk {
        #[arg(long)]
        topic: String,
        /// 역량 태그(선택 순서 유지, 반복 가능)
        #[arg(long = "competency", short = 'c')]
        competencies: Vec<String>,
        /// 성취기준
        #[arg(long)]
        standard: Option<String>,
        #[arg(long)]
        include_standard: bool,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        enrich: bool,
    },
    /// 행발: 키워드와 특성으로 문구 생성
    Haengbal {
        /// 키워드 태그(선택 순서 유지, 반복 가능)
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,
        /// 기타 특성 (예: "청소 시간에 솔선수범")
        #[arg(long)]
        note: Option<String>,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        enrich: bool,
    },
    /// 증빙 이미지로 창체 특기사항 생성
    Images {
        /// 이미지 파일(순서대로 1번, 2번 ...)
        paths: Vec<PathBuf>,
        /// 추가 요청 사항 / 참고 스타일
        #[arg(long, default_value = "")]
        instruction: String,
        /// 결과를 클립보드로 복사
        #[arg(long)]
        copy: bool,
    },
    /// 문구 하나를 AI로 윤문
    Polish {
        text: String,
        /// 풍성하게 대신 간결하게 요약
        #[arg(long)]
        simplify: bool,
    },
    /// 학년/학기별 학사일정 보기
    Schedule {
        #[arg(long, default_value_t = 1)]
        grade: u8,
        #[arg(long, default_value_t = 1)]
        semester: u8,
    },
    /// 선택 가능한 역량/키워드 태그 보기
    Phrases,
    /// 적용 중인 설정과 API key 해석 결과 보기
    Config,
}

#[derive(Debug, Clone)]
pub struct ChangcheOptions {
    pub grade: u8,
    pub semester: u8,
    pub pick: Option<usize>,
    pub manual: Option<String>,
    pub count: Option<usize>,
    pub enrich: bool,
}

#[derive(Debug, Clone)]
pub struct SeteukOptions {
    pub topic: String,
    pub competencies: Vec<String>,
    pub standard: Option<String>,
    pub include_standard: bool,
    pub count: usize,
    pub enrich: bool,
}

#[derive(Debug, Clone)]
pub struct HaengbalOptions {
    pub keywords: Vec<String>,
    pub note: Option<String>,
    pub count: usize,
    pub enrich: bool,
}

#[derive(Debug, Clone)]
pub struct ImagesOptions {
    pub paths: Vec<PathBuf>,
    pub instruction: String,
    pub copy: bool,
}

#[derive(Debug, Clone)]
pub enum CliAction {
    Interactive,
    InspectConfig,
    Changche(ChangcheOptions),
    Seteuk(SeteukOptions),
    Haengbal(HaengbalOptions),
    Images(ImagesOptions),
    Polish { text: String, mode: PolishMode },
    Schedule { grade: u8, semester: u8 },
    Phrases,
}

impl Cli {
    /// 인자를 파싱해 (시드, 실행 동작)을 돌려준다.
    pub fn parse_action() -> Result<(Option<u64>, CliAction), String> {
        let cli = Cli::parse();
        let seed = cli.seed;
        Ok((seed, cli.into_action()?))
    }

    fn into_action(self) -> Result<CliAction, String> {
        let Some(command) = self.command else {
            return Ok(CliAction::Interactive);
        };

        let action = match command {
            Commands::Config => CliAction::InspectConfig,
            Commands::Changche {
                grade,
                semester,
                pick,
                manual,
                count,
                enrich,
            } => {
                if pick.is_none() && manual.is_none() {
                    return Err("--pick <번호> 또는 --manual <활동>이 필요합니다".to_string());
                }
                CliAction::Changche(ChangcheOptions {
                    grade,
                    semester,
                    pick,
                    manual,
                    count,
                    enrich,
                })
            }
            Commands::Seteuk {
                topic,
                competencies,
                standard,
                include_standard,
                count,
                enrich,
            } => CliAction::Seteuk(SeteukOptions {
                topic,
                competencies,
                standard,
                include_standard,
                count: count.max(1),
                enrich,
            }),
            Commands::Haengbal {
                keywords,
                note,
                count,
                enrich,
            } => CliAction::Haengbal(HaengbalOptions {
                keywords,
                note,
                count: count.max(1),
                enrich,
            }),
            Commands::Images {
                paths,
                instruction,
                copy,
            } => CliAction::Images(ImagesOptions {
                paths,
                instruction,
                copy,
            }),
            Commands::Polish { text, simplify } => CliAction::Polish {
                text,
                mode: if simplify {
                    PolishMode::Simplify
                } else {
                    PolishMode::Enrich
                },
            },
            Commands::Schedule { grade, semester } => CliAction::Schedule { grade, semester },
            Commands::Phrases => CliAction::Phrases,
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
        cli.into_action()
    }

    #[test]
    fn no_subcommand_is_interactive() {
        assert!(matches!(action(&["saenggibu"]), Ok(CliAction::Interactive)));
    }

    #[test]
    fn changche_requires_an_activity() {
        assert!(action(&["saenggibu", "changche"]).is_err());
        let Ok(CliAction::Changche(opts)) =
            action(&["saenggibu", "changche", "--manual", "2025.05.05. 체육대회"])
        else {
            panic!("expected changche action");
        };
        assert_eq!(opts.manual.as_deref(), Some("2025.05.05. 체육대회"));
        assert_eq!(opts.grade, 1);
    }

    #[test]
    fn grade_is_range_checked() {
        assert!(action(&["saenggibu", "changche", "--grade", "4", "--pick", "1"]).is_err());
    }

    #[test]
    fn competencies_keep_argument_order() {
        let Ok(CliAction::Seteuk(opts)) = action(&[
            "saenggibu", "seteuk", "--topic", "산화 환원", "-c", "협업 능력", "-c", "탐구력",
        ]) else {
            panic!("expected seteuk action");
        };
        assert_eq!(opts.competencies, vec!["협업 능력", "탐구력"]);
        assert_eq!(opts.count, 1);
    }

    #[test]
    fn polish_simplify_flag_selects_mode() {
        let Ok(CliAction::Polish { mode, .. }) =
            action(&["saenggibu", "polish", "성실함.", "--simplify"])
        else {
            panic!("expected polish action");
        };
        assert_eq!(mode, PolishMode::Simplify);
    }
}
