// 帕鲁配种求解器命令行入口
// 开发心理：CLI只做三件事——把参数翻译成TargetSpec、喂给求解器、渲染结果
// 存档解码不在这里：池子从外部工具导出的JSON读进来

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use palbreed::pool::{LocationKind, OwnedGender, OwnedInstance, PalPool, StorageLocation};
use palbreed::solver::TargetSpec;
use palbreed::{
    builtin_catalog, BreedingSolver, CancellationToken, Catalog, Gender, IvThresholds,
    SolverConfig,
};

#[derive(Parser)]
#[command(name = "palbreed", version = palbreed::VERSION, about = "帕鲁配种路径求解器")]
struct Cli {
    // 求解器配置（TOML），缺省用内置默认值
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    // 图鉴JSON，缺省用内置演示图鉴
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    // 求解目标帕鲁的配种路径
    Solve {
        // 现货池JSON（外部存档导出工具的产物），缺省为空池
        #[arg(long)]
        pool: Option<PathBuf>,
        // 目标物种，名字或id
        #[arg(long)]
        species: String,
        // 期望词条，名字或id，可以重复给
        #[arg(long = "passive")]
        passives: Vec<String>,
        // 目标性别：male / female
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        min_hp: Option<u8>,
        #[arg(long)]
        min_attack: Option<u8>,
        #[arg(long)]
        min_defense: Option<u8>,
        // 以JSON输出结果树（默认为文本渲染）
        #[arg(long)]
        json: bool,
    },
    // 列出图鉴内容
    Catalog,
    // 生成一份随机演示现货池，方便上手试跑
    DemoPool {
        #[arg(long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    palbreed::init();
    if let Err(e) = run() {
        error!("运行失败: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SolverConfig::load_toml(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => SolverConfig::default(),
    };
    let loaded_catalog = match &cli.catalog {
        Some(path) => Some(
            Catalog::load_json(path)
                .with_context(|| format!("加载图鉴失败: {}", path.display()))?,
        ),
        None => None,
    };
    let catalog: &Catalog = loaded_catalog.as_ref().unwrap_or_else(|| builtin_catalog());

    match cli.command {
        Command::Solve {
            pool,
            species,
            passives,
            gender,
            min_hp,
            min_attack,
            min_defense,
            json,
        } => {
            let pool = match pool {
                Some(path) => PalPool::load_json(&path)
                    .with_context(|| format!("加载现货池失败: {}", path.display()))?,
                None => PalPool::default(),
            };
            let target = build_target(
                catalog, &species, &passives, gender.as_deref(),
                min_hp, min_attack, min_defense,
            )?;

            let solver = BreedingSolver::new(catalog, config)?;
            let trees = solver.solve_trees(&pool, &target, &CancellationToken::new())?;
            if trees.is_empty() {
                info!("在当前约束下目标不可达");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&trees)?);
            } else {
                for (rank, tree) in trees.iter().enumerate() {
                    println!("=== 方案 {} ===", rank + 1);
                    print!("{}", tree.render_text());
                    println!();
                }
            }
        }
        Command::Catalog => {
            println!("物种（{}个）:", catalog.species.len());
            for species in &catalog.species {
                println!(
                    "  {:>4}  {:<12} 配种力{:>5}  雄性{:>3}%  捕捉等级{}",
                    species.id,
                    species.name,
                    species.breeding_power,
                    species.male_probability,
                    species.capture_rank
                );
            }
            println!("词条（{}条）:", catalog.passives.len());
            for passive in &catalog.passives {
                let price = match passive.surgery_price {
                    Some(p) => format!("{}金", p),
                    None => "买不到".to_string(),
                };
                println!(
                    "  {:>4}  {:<12} 阶级{:>2}  手术价格: {}",
                    passive.id, passive.name, passive.rank, price
                );
            }
        }
        Command::DemoPool { count, seed, output } => {
            let pool = generate_demo_pool(catalog, count, seed);
            std::fs::write(&output, serde_json::to_string_pretty(&pool)?)
                .with_context(|| format!("写入失败: {}", output.display()))?;
            info!("演示现货池已写入 {}（{}只）", output.display(), pool.len());
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_target(
    catalog: &Catalog,
    species: &str,
    passives: &[String],
    gender: Option<&str>,
    min_hp: Option<u8>,
    min_attack: Option<u8>,
    min_defense: Option<u8>,
) -> Result<TargetSpec> {
    let species_id = match species.parse::<u16>() {
        Ok(id) => id,
        Err(_) => match catalog.species_by_name(species) {
            Some(s) => s.id,
            None => bail!("图鉴里没有物种: {}", species),
        },
    };

    let mut desired = Vec::with_capacity(passives.len());
    for name in passives {
        let id = match name.parse::<u16>() {
            Ok(id) => id,
            Err(_) => match catalog.passive_by_name(name) {
                Some(p) => p.id,
                None => bail!("图鉴里没有词条: {}", name),
            },
        };
        desired.push(id);
    }

    let gender = match gender {
        Some(text) => Some(parse_gender(text)?),
        None => None,
    };

    Ok(TargetSpec {
        species: species_id,
        desired_passives: desired,
        iv_thresholds: IvThresholds {
            hp: min_hp,
            attack: min_attack,
            defense: min_defense,
        },
        gender,
    })
}

fn parse_gender(text: &str) -> Result<Gender> {
    match text.to_ascii_lowercase().as_str() {
        "male" | "m" | "♂" => Ok(Gender::Male),
        "female" | "f" | "♀" => Ok(Gender::Female),
        other => bail!("无法识别的性别: {}（用 male 或 female）", other),
    }
}

fn generate_demo_pool(catalog: &Catalog, count: usize, seed: u64) -> PalPool {
    let mut rng = fastrand::Rng::with_seed(seed);
    let locations = [
        LocationKind::Palbox,
        LocationKind::Palbox,
        LocationKind::StorageContainer,
        LocationKind::Base,
        LocationKind::Party,
    ];
    let players = ["player1", "player2"];

    let mut instances = Vec::with_capacity(count);
    for index in 0..count {
        let species = &catalog.species[rng.usize(..catalog.species.len())];
        let mut passives = Vec::new();
        for _ in 0..rng.usize(0..=3) {
            let passive = &catalog.passives[rng.usize(..catalog.passives.len())];
            if !passives.contains(&passive.id) {
                passives.push(passive.id);
            }
        }
        instances.push(OwnedInstance {
            instance_id: format!("demo-{:03}", index),
            species: species.id,
            gender: if rng.bool() {
                OwnedGender::Male
            } else {
                OwnedGender::Female
            },
            passives,
            iv_hp: rng.u8(0..=100),
            iv_attack: rng.u8(0..=100),
            iv_defense: rng.u8(0..=100),
            location: StorageLocation {
                kind: locations[rng.usize(..locations.len())],
                label: None,
            },
            player: players[rng.usize(..players.len())].to_string(),
        });
    }
    PalPool { instances }
}
