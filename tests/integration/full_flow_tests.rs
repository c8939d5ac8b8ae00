//! End-to-end care loops driven entirely through button input and frames,
//! the way the firmware's frame loop drives the service.

use dolphinpet::app::events::AppEvent;
use dolphinpet::app::service::AppService;
use dolphinpet::config::GameConfig;
use dolphinpet::drivers::button::{ButtonEvent, ButtonId};
use dolphinpet::game::Screen;
use dolphinpet::pet::Stage;

use crate::mock_ports::{MockStore, NullDisplay, RecordingSink};

/// A booted service plus its mock surroundings and a wall clock.
struct World {
    svc: AppService,
    store: MockStore,
    sink: RecordingSink,
    display: NullDisplay,
    now_secs: u32,
}

impl World {
    /// Boot with no save and click through the splash into a fresh game.
    fn started(seed: u64) -> Self {
        let mut world = Self {
            svc: AppService::new(GameConfig::default(), seed),
            store: MockStore::new(),
            sink: RecordingSink::new(),
            display: NullDisplay,
            now_secs: 0,
        };
        world.svc.boot(&world.store, 0, &mut world.sink);
        world.press(ButtonId::Right, ButtonEvent::Click);
        assert_eq!(world.svc.game().screen, Screen::Main);
        world
    }

    fn press(&mut self, button: ButtonId, event: ButtonEvent) {
        self.svc
            .handle_button(&mut self.store, button, event, self.now_secs, &mut self.sink);
    }

    /// Run whole-minute frames, the worst case for decay timing.
    fn run_minutes(&mut self, minutes: u32) {
        for _ in 0..minutes {
            self.svc.frame(60_000, &mut self.display, &mut self.sink);
            self.now_secs += 60;
        }
    }

    /// Open the menu from Main and cycle the cursor to `index`. The cursor
    /// position survives between menu visits, so navigate absolutely.
    fn open_menu_at(&mut self, index: usize) {
        self.press(ButtonId::Right, ButtonEvent::Click);
        assert_eq!(self.svc.game().screen, Screen::Menu);
        for _ in 0..7 {
            if self.svc.game().menu_cursor == index {
                return;
            }
            self.press(ButtonId::Left, ButtonEvent::Click);
        }
        panic!("menu cursor never reached {index}");
    }

    fn confirm(&mut self) {
        self.press(ButtonId::Right, ButtonEvent::LongPress);
    }
}

#[test]
fn egg_hatches_and_eats_its_first_fish() {
    let mut world = World::started(11);
    assert_eq!(world.svc.pet().stage, Stage::Egg);

    // Eggs hatch after two minutes and don't decay while incubating.
    world.run_minutes(2);
    assert_eq!(world.svc.pet().stage, Stage::Baby);
    assert_eq!(world.svc.pet().hunger, 50);

    let hunger_before = world.svc.pet().hunger;
    world.open_menu_at(0); // FEED
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Feed);
    world.confirm(); // FISH

    assert_eq!(world.svc.game().screen, Screen::Main);
    assert_eq!(world.svc.pet().times_fed, 1);
    assert_eq!(world.svc.pet().hunger, hunger_before + 20);
}

#[test]
fn stats_page_opens_and_any_press_leaves() {
    let mut world = World::started(12);
    world.run_minutes(2);

    world.open_menu_at(5); // STAT
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Stats);

    world.press(ButtonId::Left, ButtonEvent::Click);
    assert_eq!(world.svc.game().screen, Screen::Main);
}

#[test]
fn sleep_restores_energy_and_wakes_naturally() {
    let mut world = World::started(13);
    world.run_minutes(30);
    let tired = world.svc.pet().energy;
    assert!(tired < 80, "expected a tired pet, energy={tired}");

    world.open_menu_at(2); // ZZZ
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Sleep);
    assert!(world.svc.pet().is_sleeping);

    // Energy climbs 5/min asleep; wake is automatic at full.
    let mut slept = 0;
    while world.svc.game().screen == Screen::Sleep {
        world.run_minutes(1);
        slept += 1;
        assert!(slept < 30, "pet never woke up");
    }
    assert_eq!(world.svc.game().screen, Screen::Main);
    assert!(!world.svc.pet().is_sleeping);
    assert_eq!(world.svc.pet().energy, 100);
}

#[test]
fn losing_the_minigame_still_cheers_the_pet_up() {
    let mut world = World::started(14);
    world.run_minutes(2);
    let happiness_before = world.svc.pet().happiness;
    let energy_before = world.svc.pet().energy;

    world.open_menu_at(1); // PLAY
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Play);
    assert_eq!(world.svc.pet().games_played, 1);

    // Never jump; every wave hits and the session ends in a loss. Frames
    // run at the real 33 ms cadence, far below the decay granularity.
    for _ in 0..10_000 {
        world.svc.frame(33, &mut world.display, &mut world.sink);
        if world.svc.game().screen != Screen::Play {
            break;
        }
    }

    assert_eq!(world.svc.game().screen, Screen::Main);
    assert!(world
        .sink
        .contains(&AppEvent::MiniGameFinished { won: false }));
    assert_eq!(world.svc.pet().happiness, happiness_before + 5);
    assert_eq!(world.svc.pet().energy, energy_before - 5);
    assert_eq!(world.svc.pet().games_won, 0);
}

#[test]
fn cleaning_clears_every_scrap_of_waste() {
    let mut world = World::started(15);
    world.run_minutes(2);

    // Waste is probabilistic but certain by the top of the dwell window.
    let mut waited = 0;
    while !world.svc.pet().has_waste {
        world.run_minutes(1);
        waited += 1;
        assert!(waited < 120, "no waste after two hours");
    }

    world.open_menu_at(3); // CLEAN
    world.confirm();

    assert_eq!(world.svc.game().screen, Screen::Main);
    assert!(!world.svc.pet().has_waste);
    assert_eq!(world.svc.pet().waste_count, 0);
    assert_eq!(world.svc.pet().times_cleaned, 1);
}

#[test]
fn neglect_is_fatal_and_reported_once() {
    let mut world = World::started(16);
    world.run_minutes(2);

    // Ten simulated days of total neglect.
    let mut survived_minutes = 0;
    for _ in 0..(10 * 24 * 60) {
        world.run_minutes(1);
        survived_minutes += 1;
        if world.svc.game().screen == Screen::Death {
            break;
        }
    }

    assert_eq!(world.svc.game().screen, Screen::Death);
    assert!(!world.svc.pet().is_alive());
    assert_eq!(
        world
            .sink
            .count_where(|e| matches!(e, AppEvent::PetDied { .. })),
        1
    );
    // Sickness precedes death on the neglect path.
    assert!(world.svc.pet().is_sick);
    assert!(survived_minutes > 30, "death should take at least the waste dwell time");
}

#[test]
fn settings_double_confirm_wipes_the_pet() {
    let mut world = World::started(17);
    world.run_minutes(2);
    world.open_menu_at(6); // SET
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Settings);

    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::NewGame);

    // Backing out leaves the pet alone.
    world.press(ButtonId::Left, ButtonEvent::Click);
    assert_eq!(world.svc.game().screen, Screen::Main);
    assert_eq!(world.svc.pet().stage, Stage::Baby);

    // Going through with it hatches a new egg.
    world.open_menu_at(6);
    world.confirm();
    world.confirm();
    world.confirm();
    assert_eq!(world.svc.game().screen, Screen::Main);
    assert_eq!(world.svc.pet().stage, Stage::Egg);
    assert_eq!(world.svc.pet().age_minutes, 0);
}
