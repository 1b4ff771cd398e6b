/*
* 手术变体生成
* 开发心理过程:
* 1. 手术是配种的替代品：花钱立即填平小差距，不花时间
* 2. 只对"差距能在配置允许的操作数内关上"的引用出手
* 3. 词条缺口：有空槽就植入，没空槽就把一个Random槽换掉；买不到的词条（传说系）放弃
* 4. 性别缺口：引用已锁定成错误的具体性别时，追加一刀性别手术
*/

use smallvec::SmallVec;

use crate::catalog::Catalog;
use crate::core::config::SolverConfig;
use crate::core::error::SolverResult;
use crate::encoding::gender::Gender;
use crate::encoding::passive_set::{PassiveId, RANDOM_PASSIVE_ID};
use crate::reference::{PalReference, SurgeryOp, SurgeryRef};
use crate::solver::inheritance::GAME_PASSIVE_CAP;
use crate::solver::TargetSpec;

// 为一个目标物种的引用生成手术变体；差距关不上或超预算时返回空
pub fn surgery_variants(
    reference: &PalReference,
    target: &TargetSpec,
    catalog: &Catalog,
    config: &SolverConfig,
) -> SolverResult<Vec<PalReference>> {
    if config.max_surgery_ops == 0 {
        return Ok(Vec::new());
    }

    let effective = reference.effective_passives();
    let missing: Vec<PassiveId> = target
        .desired_passives
        .iter()
        .copied()
        .filter(|&id| !effective.contains(id))
        .collect();

    let gender_gap = match target.gender {
        Some(wanted) => {
            let current = reference.gender();
            current.is_specific() && current != wanted
        }
        None => false,
    };

    if missing.is_empty() && !gender_gap {
        return Ok(Vec::new());
    }

    let op_count = missing.len() + usize::from(gender_gap);
    if op_count > config.max_surgery_ops as usize {
        return Ok(Vec::new());
    }

    let mut ops: SmallVec<[SurgeryOp; 2]> = SmallVec::new();
    let mut occupied = effective.count();
    let mut randoms_left = effective.random_count();

    for passive in missing {
        let skill = catalog.passive(passive)?;
        let price = match skill.surgery_price {
            Some(price) => price,
            // 买不到的词条关不上差距
            None => return Ok(Vec::new()),
        };
        if occupied < GAME_PASSIVE_CAP {
            ops.push(SurgeryOp::AddPassive { passive, price });
            occupied += 1;
        } else if randoms_left > 0 {
            ops.push(SurgeryOp::SwapPassive {
                remove: RANDOM_PASSIVE_ID,
                add: passive,
                price,
            });
            randoms_left -= 1;
        } else {
            // 槽位满且没有可换的Random，放弃
            return Ok(Vec::new());
        }
    }

    if gender_gap {
        let wanted = target.gender.unwrap_or(Gender::Male);
        ops.push(SurgeryOp::ForceGender {
            gender: wanted,
            price: config.gender_surgery_price,
        });
    }

    let variant = SurgeryRef::new(reference.clone(), ops)?;
    Ok(vec![PalReference::Surgery(Box::new(variant))])
}
