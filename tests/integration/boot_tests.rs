//! Boot and persistence lifecycle across simulated power cycles.

use dolphinpet::app::events::AppEvent;
use dolphinpet::app::ports::SavePort;
use dolphinpet::app::service::AppService;
use dolphinpet::config::GameConfig;
use dolphinpet::drivers::button::{ButtonEvent, ButtonId};
use dolphinpet::game::Screen;
use dolphinpet::pet::{Pet, Stage};
use dolphinpet::save::SaveData;

use crate::mock_ports::{MockStore, NullDisplay, RecordingSink};

fn service(seed: u64) -> AppService {
    AppService::new(GameConfig::default(), seed)
}

#[test]
fn first_boot_waits_on_splash() {
    let mut svc = service(1);
    let store = MockStore::new();
    let mut sink = RecordingSink::new();

    svc.boot(&store, 0, &mut sink);

    assert_eq!(svc.game().screen, Screen::Splash);
    assert!(sink.contains(&AppEvent::Started {
        screen: Screen::Splash
    }));
}

#[test]
fn pet_survives_a_power_cycle() {
    let cfg = GameConfig::default();
    let mut store = MockStore::new();
    let mut sink = RecordingSink::new();

    // Session one: hatch a pet and let the autosave interval pass.
    let mut svc = service(2);
    svc.boot(&store, 0, &mut sink);
    svc.handle_button(&mut store, ButtonId::Right, ButtonEvent::Click, 10, &mut sink);
    assert_eq!(svc.game().screen, Screen::Main);

    let mut display = NullDisplay;
    // Three simulated minutes of frames, then an autosave window.
    for _ in 0..3 {
        svc.frame(60_000, &mut display, &mut sink);
    }
    svc.maybe_autosave(&mut store, 10 + cfg.autosave_interval_secs, &mut sink);
    let age_at_save = svc.pet().age_minutes;
    assert!(store.saves >= 2); // new-game save + autosave

    // Session two: new service, same store, one hour later.
    let reboot_secs = 10 + cfg.autosave_interval_secs + 3_600;
    let mut svc2 = service(3);
    let mut sink2 = RecordingSink::new();
    svc2.boot(&store, reboot_secs, &mut sink2);

    assert_eq!(svc2.game().screen, Screen::Main);
    assert_eq!(svc2.pet().age_minutes, age_at_save + 60);
    assert!(sink2.contains(&AppEvent::OfflineCatchUp { minutes: 60 }));
}

#[test]
fn offline_time_is_capped_at_boot() {
    let cfg = GameConfig::default();
    let mut pet = Pet::new(0);
    pet.stage = Stage::Adult;
    pet.age_minutes = 20_000;
    let store = MockStore::with_pet(&pet, 0);

    // A whole year unplugged.
    let mut svc = service(4);
    let mut sink = RecordingSink::new();
    svc.boot(&store, 365 * 24 * 3_600, &mut sink);

    assert!(sink.contains(&AppEvent::OfflineCatchUp {
        minutes: cfg.max_offline_minutes
    }));
    assert_eq!(svc.pet().age_minutes, 20_000 + cfg.max_offline_minutes);
}

#[test]
fn sleeping_pet_resumes_on_the_sleep_screen() {
    let mut pet = Pet::new(0);
    pet.stage = Stage::Child;
    assert!(pet.sleep());
    let store = MockStore::with_pet(&pet, 100);

    let mut svc = service(5);
    let mut sink = RecordingSink::new();
    svc.boot(&store, 100, &mut sink);

    assert_eq!(svc.game().screen, Screen::Sleep);
    assert!(svc.pet().is_sleeping);
}

#[test]
fn dead_pet_resumes_on_the_death_screen() {
    let mut pet = Pet::new(0);
    pet.stage = Stage::Adult;
    pet.health = 0;
    let store = MockStore::with_pet(&pet, 100);

    let mut svc = service(6);
    let mut sink = RecordingSink::new();
    svc.boot(&store, 100, &mut sink);

    assert_eq!(svc.game().screen, Screen::Death);
}

#[test]
fn corrupt_save_falls_back_to_splash() {
    let mut pet = Pet::new(0);
    pet.stage = Stage::Teen;
    let mut store = MockStore::with_pet(&pet, 100);
    if let Some((data, _)) = store.blob.as_mut() {
        data.version = 200;
    }

    let mut svc = service(7);
    let mut sink = RecordingSink::new();
    svc.boot(&store, 100, &mut sink);

    assert_eq!(svc.game().screen, Screen::Splash);

    // The old save is replaced once a new game starts.
    svc.handle_button(&mut store, ButtonId::Right, ButtonEvent::Click, 200, &mut sink);
    let (stored, _) = store.blob.as_ref().unwrap();
    assert_eq!(stored.version, dolphinpet::save::SAVE_VERSION);
    assert_eq!(stored.stage, Stage::Egg as u8);
}

#[test]
fn blob_roundtrip_through_a_real_store() {
    let mut pet = Pet::new(0);
    pet.stage = Stage::Adult;
    pet.hunger = 42;
    pet.games_won = 7;

    let data = SaveData::capture(&pet);
    let bytes = data.to_bytes().unwrap();
    let back = SaveData::from_bytes(&bytes).unwrap().restore().unwrap();

    assert_eq!(back.stage, Stage::Adult);
    assert_eq!(back.hunger, 42);
    assert_eq!(back.games_won, 7);
}

#[test]
fn death_screen_confirm_buries_pet_and_starts_over() {
    let mut pet = Pet::new(0);
    pet.stage = Stage::Adult;
    pet.health = 0;
    pet.age_minutes = 50_000;
    let mut store = MockStore::with_pet(&pet, 100);

    let mut svc = service(8);
    let mut sink = RecordingSink::new();
    svc.boot(&store, 100, &mut sink);
    assert_eq!(svc.game().screen, Screen::Death);

    svc.handle_button(&mut store, ButtonId::Left, ButtonEvent::Click, 150, &mut sink);

    assert_eq!(svc.game().screen, Screen::Main);
    assert_eq!(svc.pet().stage, Stage::Egg);
    assert_eq!(svc.pet().age_minutes, 0);
    // The fresh egg is persisted immediately.
    assert_eq!(store.load().unwrap().stage, Stage::Egg as u8);
}
