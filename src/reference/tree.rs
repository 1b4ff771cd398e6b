/*
* 配种树物化器
* 开发心理过程:
* 1. 把选中的引用摊平成可展示/可导出的树：每个配种或手术步骤一个节点，
*    每个Owned/Wild引用一个叶子
* 2. 节点里只放展示需要的数据（物种名、性别、概率、工时），不回指引用对象
* 3. 文本渲染给CLI用，JSON导出给外部持久化协作者用
*/

use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::error::SolverResult;
use crate::encoding::passive_set::{PassiveId, RANDOM_PASSIVE_ID};
use crate::reference::{PalReference, SurgeryOp};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Owned {
        species: String,
        instance_id: String,
        gender: String,
        passives: Vec<String>,
        location: String,
        player: String,
    },
    Wild {
        species: String,
        random_slots: u8,
        expected_minutes: f64,
    },
    Composite {
        species: String,
        male_instance_id: String,
        female_instance_id: String,
    },
    Bred {
        species: String,
        probability_percent: f64,
        step_minutes: f64,
        parents: Vec<TreeNode>,
    },
    Surgery {
        species: String,
        operations: Vec<String>,
        cost: u32,
        input: Box<TreeNode>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BreedingTree {
    pub root: TreeNode,
    pub total_minutes: f64,
    pub total_cost: u32,
    pub breeding_steps: u8,
}

impl BreedingTree {
    pub fn from_reference(reference: &PalReference, catalog: &Catalog) -> Self {
        BreedingTree {
            root: build_node(reference, catalog),
            total_minutes: reference.total_effort().as_minutes(),
            total_cost: reference.total_cost(),
            breeding_steps: reference.breeding_steps(),
        }
    }

    pub fn to_json(&self) -> SolverResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        render_node(&self.root, 0, &mut out);
        out.push_str(&format!(
            "总计: {:.0}分钟, {}金, {}步配种\n",
            self.total_minutes, self.total_cost, self.breeding_steps
        ));
        out
    }
}

fn species_name(catalog: &Catalog, id: crate::catalog::SpeciesId) -> String {
    catalog
        .species(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|_| format!("#{}", id))
}

fn passive_name(catalog: &Catalog, id: PassiveId) -> String {
    if id == RANDOM_PASSIVE_ID {
        return "<随机>".to_string();
    }
    catalog
        .passive(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|_| format!("#{}", id))
}

fn build_node(reference: &PalReference, catalog: &Catalog) -> TreeNode {
    match reference {
        PalReference::Owned(r) => TreeNode::Owned {
            species: species_name(catalog, r.instance.species),
            instance_id: r.instance.instance_id.clone(),
            gender: r.gender().to_string(),
            passives: r.actual.iter().map(|id| passive_name(catalog, id)).collect(),
            location: format!("{:?}", r.instance.location.kind),
            player: r.instance.player.clone(),
        },
        PalReference::Wild(r) => TreeNode::Wild {
            species: species_name(catalog, r.species),
            random_slots: r.random_slots,
            expected_minutes: r.effort.as_minutes(),
        },
        PalReference::Composite(r) => TreeNode::Composite {
            species: species_name(catalog, r.male.instance.species),
            male_instance_id: r.male.instance.instance_id.clone(),
            female_instance_id: r.female.instance.instance_id.clone(),
        },
        PalReference::Bred(r) => TreeNode::Bred {
            species: species_name(catalog, r.species),
            probability_percent: r.probability.as_f64() * 100.0,
            step_minutes: r.self_effort.as_minutes(),
            parents: vec![
                build_node(&r.parents.0, catalog),
                build_node(&r.parents.1, catalog),
            ],
        },
        PalReference::Surgery(r) => TreeNode::Surgery {
            species: species_name(catalog, r.input.species_id()),
            operations: r.ops.iter().map(|op| describe_op(op, catalog)).collect(),
            cost: r.total_cost,
            input: Box::new(build_node(&r.input, catalog)),
        },
    }
}

fn describe_op(op: &SurgeryOp, catalog: &Catalog) -> String {
    match op {
        SurgeryOp::AddPassive { passive, price } => {
            format!("植入 {} ({}金)", passive_name(catalog, *passive), price)
        }
        SurgeryOp::SwapPassive { remove, add, price } => format!(
            "把 {} 换成 {} ({}金)",
            passive_name(catalog, *remove),
            passive_name(catalog, *add),
            price
        ),
        SurgeryOp::ForceGender { gender, price } => {
            format!("改性别为 {} ({}金)", gender, price)
        }
    }
}

fn render_node(node: &TreeNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::Owned {
            species,
            instance_id,
            gender,
            passives,
            location,
            player,
        } => {
            out.push_str(&format!(
                "{}[已有] {} {} ({}) 词条[{}] @{} / {}\n",
                indent,
                species,
                gender,
                instance_id,
                passives.join(", "),
                location,
                player
            ));
        }
        TreeNode::Wild {
            species,
            random_slots,
            expected_minutes,
        } => {
            out.push_str(&format!(
                "{}[野捕] {} 期待{}条随机词条, 约{:.0}分钟\n",
                indent, species, random_slots, expected_minutes
            ));
        }
        TreeNode::Composite {
            species,
            male_instance_id,
            female_instance_id,
        } => {
            out.push_str(&format!(
                "{}[现货双性] {} ♂{} + ♀{}\n",
                indent, species, male_instance_id, female_instance_id
            ));
        }
        TreeNode::Bred {
            species,
            probability_percent,
            step_minutes,
            parents,
        } => {
            out.push_str(&format!(
                "{}[配种] {} 单次命中{:.1}%, 本步约{:.0}分钟\n",
                indent, species, probability_percent, step_minutes
            ));
            for parent in parents {
                render_node(parent, depth + 1, out);
            }
        }
        TreeNode::Surgery {
            species,
            operations,
            cost,
            input,
        } => {
            out.push_str(&format!(
                "{}[手术] {} {} 共{}金\n",
                indent,
                species,
                operations.join("; "),
                cost
            ));
            render_node(input, depth + 1, out);
        }
    }
}
