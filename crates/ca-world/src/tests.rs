//! Unit tests for ca-world.

use ca_core::{BlockPos, BuildingId, DyeColor, EntityId, ItemKind, ItemStack, Tick};
use ca_herd::{CreatureKind, HerdWorld, PathStatus, ShearWorld};
use ca_sim::SimWorld;

use crate::*;

const CENTER: BlockPos = BlockPos::new(0, 64, 0);

// ── StraightPather ────────────────────────────────────────────────────────────

#[cfg(test)]
mod pather_tests {
    use super::*;

    #[test]
    fn walks_one_step_per_tick() {
        let pather = StraightPather::default();
        let mut walker = CENTER;
        let target = BlockPos::new(4, 64, 0);

        assert_eq!(pather.step(&mut walker, target), PathStatus::EnRoute);
        assert_eq!(walker, BlockPos::new(1, 64, 0));
        assert_eq!(pather.step(&mut walker, target), PathStatus::EnRoute);
        assert_eq!(pather.step(&mut walker, target), PathStatus::Arrived);
        assert_eq!(walker, BlockPos::new(3, 64, 0), "stops within reach");
    }

    #[test]
    fn far_targets_are_unreachable() {
        let pather = StraightPather { max_range: 10, ..StraightPather::default() };
        let mut walker = CENTER;
        assert_eq!(pather.step(&mut walker, BlockPos::new(50, 64, 0)), PathStatus::Unreachable);
        assert_eq!(walker, CENTER);
    }

    #[test]
    fn faster_walkers_cover_more_ground() {
        let pather = StraightPather { speed: 3, ..StraightPather::default() };
        let mut walker = CENTER;
        assert_eq!(pather.step(&mut walker, BlockPos::new(20, 64, 0)), PathStatus::EnRoute);
        assert_eq!(walker, BlockPos::new(3, 64, 0));
    }
}

// ── Pasture ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pasture_tests {
    use super::*;

    #[test]
    fn find_nearby_filters_kind_and_radius() {
        let mut pasture = Pasture::new(1);
        let near = pasture.spawn(CreatureKind::Sheep, BlockPos::new(3, 64, 4));
        pasture.spawn(CreatureKind::Sheep, BlockPos::new(30, 64, 0));
        pasture.spawn(CreatureKind::Cow, BlockPos::new(1, 64, 1));
        let edge = pasture.spawn(CreatureKind::Sheep, BlockPos::new(0, 64, 9));

        let found = pasture.find_nearby(CreatureKind::Sheep, CENTER, 10).unwrap();
        let ids: Vec<EntityId> = found.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![near, edge], "sorted by id");

        assert!(pasture.find_nearby(CreatureKind::Pig, CENTER, 100).unwrap().is_empty());
    }

    #[test]
    fn shear_marks_and_yields_wool() {
        let mut pasture = Pasture::new(2);
        let id = pasture.spawn(CreatureKind::Sheep, BlockPos::new(1, 64, 0));

        let wool = pasture.shear(id, 0).unwrap();
        assert_eq!(wool.len(), 1);
        assert_eq!(wool[0].kind, ItemKind::Wool(DyeColor::White));
        assert!((1..=3).contains(&wool[0].count));
        assert!(pasture.get(id).unwrap().sheared);

        assert!(pasture.shear(id, 0).is_err(), "already sheared");
        assert!(pasture.shear(EntityId(99), 0).is_err());
    }

    #[test]
    fn dyed_fleece_comes_off_coloured() {
        let mut pasture = Pasture::new(3);
        let id = pasture.spawn(CreatureKind::Sheep, CENTER);
        pasture.dye_fleece(id, DyeColor::Lime).unwrap();
        let wool = pasture.shear(id, 1).unwrap();
        assert_eq!(wool[0].kind, ItemKind::Wool(DyeColor::Lime));
        assert!(wool[0].count >= 2, "fortune adds to the yield");
    }

    #[test]
    fn breeding_spawns_a_child() {
        let mut pasture = Pasture::new(4);
        let a = pasture.spawn(CreatureKind::Sheep, BlockPos::new(2, 64, 2));
        let b = pasture.spawn(CreatureKind::Sheep, BlockPos::new(3, 64, 2));

        pasture.breed(a, b).unwrap();
        assert!(pasture.get(a).unwrap().in_love);
        assert!(pasture.get(b).unwrap().in_love);
        assert_eq!(pasture.len(), 2, "lamb arrives on advance");
        assert!(pasture.breed(a, b).is_err(), "already fed");

        pasture.advance(Tick(1));
        assert_eq!(pasture.len(), 3);
        assert!(!pasture.get(a).unwrap().in_love);
        assert_eq!(pasture.get(a).unwrap().age, BREED_COOLDOWN);
        let child = pasture.creatures().find(|c| c.is_child()).unwrap();
        assert_eq!(child.age, CHILD_AGE);
        assert_eq!(child.pos, BlockPos::new(2, 64, 2));
        assert_eq!(pasture.find_nearby(CreatureKind::Sheep, CENTER, 5).unwrap().len(), 3);

        assert!(pasture.breed(a, b).is_err(), "parents are cooling down");
    }

    #[test]
    fn herd_search_reports_pairs_in_love() {
        let mut pasture = Pasture::new(4);
        let a = pasture.spawn(CreatureKind::Sheep, BlockPos::new(1, 64, 0));
        let b = pasture.spawn(CreatureKind::Sheep, BlockPos::new(2, 64, 0));
        let c = pasture.spawn(CreatureKind::Sheep, BlockPos::new(3, 64, 0));
        pasture.breed(a, b).unwrap();

        let herd = pasture.find_nearby(CreatureKind::Sheep, CENTER, 5).unwrap();
        let in_love: Vec<EntityId> = herd.iter().filter(|s| s.in_love).map(|s| s.id).collect();
        assert_eq!(in_love, vec![a, b]);
        assert!(pasture.breed(b, c).is_err(), "b was already fed");
    }

    #[test]
    fn butchered_parent_cancels_the_birth() {
        let mut pasture = Pasture::new(4);
        let a = pasture.spawn(CreatureKind::Sheep, BlockPos::new(1, 64, 0));
        let b = pasture.spawn(CreatureKind::Sheep, BlockPos::new(2, 64, 0));
        pasture.breed(a, b).unwrap();
        pasture.butcher(b).unwrap();

        pasture.advance(Tick(1));
        assert_eq!(pasture.len(), 1);
        let survivor = pasture.get(a).unwrap();
        assert!(!survivor.in_love);
        assert!(survivor.is_breedable());
    }

    #[test]
    fn butcher_removes_from_index() {
        let mut pasture = Pasture::new(5);
        let id = pasture.spawn(CreatureKind::Sheep, BlockPos::new(1, 64, 1));

        let drops = pasture.butcher(id).unwrap();
        assert!(drops.iter().any(|s| s.kind == ItemKind::Mutton));
        assert!(drops.iter().any(|s| s.kind == ItemKind::Wool(DyeColor::White)));
        assert!(pasture.is_empty());
        assert!(pasture.find_nearby(CreatureKind::Sheep, CENTER, 10).unwrap().is_empty());
        assert!(pasture.butcher(id).is_err());
    }

    #[test]
    fn storage_merges_by_kind() {
        let mut pasture = Pasture::new(6);
        let hut = BuildingId(1);
        pasture.store_in_building(hut, &[ItemStack::new(ItemKind::Mutton, 2)]).unwrap();
        pasture
            .store_in_building(hut, &[ItemStack::new(ItemKind::Mutton, 3), ItemStack::new(ItemKind::Feather, 1)])
            .unwrap();
        assert_eq!(pasture.stored(hut), &[ItemStack::new(ItemKind::Mutton, 5), ItemStack::new(ItemKind::Feather, 1)]);
        assert_eq!(pasture.stored_count(ItemKind::Mutton), 5);
        assert!(pasture.stored(BuildingId(2)).is_empty());
    }

    #[test]
    fn advance_ages_and_regrows() {
        let mut pasture = Pasture::new(7).with_regrow_chance(1.0);
        let a = pasture.spawn(CreatureKind::Sheep, CENTER);
        let b = pasture.spawn(CreatureKind::Sheep, BlockPos::new(1, 64, 0));
        pasture.breed(a, b).unwrap();
        pasture.shear(a, 0).unwrap();

        pasture.advance(Tick(1));
        assert!(!pasture.get(a).unwrap().sheared);

        pasture.advance(Tick(2));
        assert_eq!(pasture.get(a).unwrap().age, BREED_COOLDOWN - 1);
        let child = pasture.creatures().find(|c| c.is_child()).unwrap();
        assert_eq!(child.age, CHILD_AGE + 1);
    }

    #[test]
    fn far_apart_animals_do_not_overflow_the_index() {
        let mut pasture = Pasture::new(8);
        let near = pasture.spawn(CreatureKind::Sheep, BlockPos::new(2, 64, 0));
        let far = pasture.spawn(CreatureKind::Sheep, BlockPos::new(100_000, 64, -100_000));
        pasture.spawn(CreatureKind::Sheep, BlockPos::new(-29_000_000, 64, 29_000_000));

        let found = pasture.find_nearby(CreatureKind::Sheep, CENTER, 10).unwrap();
        assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![near]);

        let wide = pasture.find_nearby(CreatureKind::Sheep, CENTER, 150_000).unwrap();
        assert_eq!(wide.iter().map(|c| c.id).collect::<Vec<_>>(), vec![near, far]);

        assert_eq!(pasture.find_nearby(CreatureKind::Sheep, CENTER, u32::MAX).unwrap().len(), 3);
    }

    #[test]
    fn scatter_is_seeded() {
        let mut one = Pasture::new(11);
        let mut two = Pasture::new(11);
        one.scatter(CreatureKind::Sheep, CENTER, 8, 10);
        two.scatter(CreatureKind::Sheep, CENTER, 8, 10);
        let a: Vec<BlockPos> = one.creatures().map(|c| c.pos).collect();
        let b: Vec<BlockPos> = two.creatures().map(|c| c.pos).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|p| (p.x - CENTER.x).abs() <= 8 && (p.z - CENTER.z).abs() <= 8));
    }
}
