//! SQLite store tests against an in-memory database

#![cfg(feature = "sqlite")]

use agrorural_domain::entities::{
    AuditAction, AuditEntry, AuditFilter, Areas, Cultivo, Cultura, EntityKind, Produtor,
    PropriedadeRural, Safra,
};
use agrorural_domain::errors::DomainError;
use agrorural_domain::repositories::{
    AuditRepository, CultivoFilter, CultivoRepository, CulturaRepository, DashboardRepository,
    Page, ProdutorRepository, PropriedadeRepository, SafraRepository,
};
use agrorural_domain::value_objects::{AuditEntryId, ProdutorId, Uf};
use agrorural_persistence::{connect, SqliteStore};

async fn store() -> SqliteStore {
    connect("sqlite::memory:").await.unwrap()
}

fn fazenda(nome: &str, uf: &str) -> PropriedadeRural {
    PropriedadeRural::create(nome, "Cidade", uf, Areas::new(1000.0, 700.0, 200.0).unwrap())
        .unwrap()
}

struct Farm {
    produtor: Produtor,
    propriedade: PropriedadeRural,
    cultura: Cultura,
    safra: Safra,
}

async fn seed_farm(store: &SqliteStore, doc: &str) -> Farm {
    let produtor = Produtor::create(doc, "Produtor").unwrap();
    ProdutorRepository::save(store, &produtor).await.unwrap();

    let propriedade = fazenda("Fazenda", "MT");
    store
        .save_with_owners(&propriedade, &[produtor.id()])
        .await
        .unwrap();

    let cultura = Cultura::create(&format!("Soja {}", doc)).unwrap();
    CulturaRepository::save(store, &cultura).await.unwrap();

    let safra = Safra::create(propriedade.id(), 2024, Some("verão")).unwrap();
    SafraRepository::save(store, &safra).await.unwrap();

    Farm {
        produtor,
        propriedade,
        cultura,
        safra,
    }
}

#[tokio::test]
async fn test_produtor_roundtrip_and_unique_documento() {
    let store = store().await;
    let ana = Produtor::create("529.982.247-25", "Ana").unwrap();
    ProdutorRepository::save(&store, &ana).await.unwrap();

    let loaded = ProdutorRepository::find_by_id(&store, &ana.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.documento(), ana.documento());
    assert_eq!(loaded.nome(), "Ana");

    let dup = Produtor::create("52998224725", "Outra").unwrap();
    let err = ProdutorRepository::save(&store, &dup).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_produtor_cascade_removes_only_orphaned_properties() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;

    let partner = Produtor::create("12345678909", "Sócio").unwrap();
    ProdutorRepository::save(&store, &partner).await.unwrap();
    let shared = fazenda("Compartilhada", "GO");
    store
        .save_with_owners(&shared, &[farm.produtor.id(), partner.id()])
        .await
        .unwrap();

    let c = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        100.0,
    )
    .unwrap();
    CultivoRepository::save(&store, &c).await.unwrap();

    let report = ProdutorRepository::remove_cascade(&store, &farm.produtor.id())
        .await
        .unwrap();
    assert_eq!(report.produtores, 1);
    assert_eq!(report.propriedades, 1);
    assert_eq!(report.vinculos, 2);
    assert_eq!(report.safras, 1);
    assert_eq!(report.cultivos, 1);

    assert!(PropriedadeRepository::find_by_id(&store, &shared.id())
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        store.owners_of(&shared.id()).await.unwrap(),
        vec![partner.id()]
    );
    assert_eq!(PropriedadeRepository::count(&store).await.unwrap(), 1);
}

#[tokio::test]
async fn test_remove_cascade_unknown_produtor_is_not_found() {
    let store = store().await;
    let err = ProdutorRepository::remove_cascade(&store, &ProdutorId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EntityNotFound { .. }));
}

#[tokio::test]
async fn test_remove_cascade_failure_rolls_back_everything() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;
    let c = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        50.0,
    )
    .unwrap();
    CultivoRepository::save(&store, &c).await.unwrap();

    // the last step of the cascade fails after links, safras and cultivos
    // were already deleted inside the transaction
    sqlx::query(
        "CREATE TRIGGER block_propriedade_delete BEFORE DELETE ON propriedades \
         BEGIN SELECT RAISE(ABORT, 'propriedade delete blocked'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    assert!(ProdutorRepository::remove_cascade(&store, &farm.produtor.id())
        .await
        .is_err());

    assert!(ProdutorRepository::find_by_id(&store, &farm.produtor.id())
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        store.owners_of(&farm.propriedade.id()).await.unwrap(),
        vec![farm.produtor.id()]
    );
    assert!(SafraRepository::find_by_id(&store, &farm.safra.id())
        .await
        .unwrap()
        .is_some());
    assert!(CultivoRepository::find_by_id(&store, &c.id())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_save_with_owners_is_all_or_nothing() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;

    let nova = fazenda("Nova", "PR");
    let err = store
        .save_with_owners(&nova, &[farm.produtor.id(), ProdutorId::new()])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EntityNotFound { .. }));
    assert!(PropriedadeRepository::find_by_id(&store, &nova.id())
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        store.propriedades_of(&farm.produtor.id()).await.unwrap(),
        vec![farm.propriedade.id()]
    );
}

#[tokio::test]
async fn test_save_with_propriedades_refuses_orphaning() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;

    let mut renamed = farm.produtor.clone();
    renamed.rename("Outro Nome").unwrap();
    let err = store
        .save_with_propriedades(&renamed, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BusinessRuleViolation { .. }));

    let stored = ProdutorRepository::find_by_id(&store, &farm.produtor.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.nome(), "Produtor");
    assert_eq!(
        store.owners_of(&farm.propriedade.id()).await.unwrap(),
        vec![farm.produtor.id()]
    );

    // once a partner co-owns it the producer may step out
    let partner = Produtor::create("12345678909", "Sócio").unwrap();
    store
        .save_with_propriedades(&partner, &[farm.propriedade.id()])
        .await
        .unwrap();
    store.save_with_propriedades(&renamed, &[]).await.unwrap();
    assert_eq!(
        store.owners_of(&farm.propriedade.id()).await.unwrap(),
        vec![partner.id()]
    );
}

#[tokio::test]
async fn test_area_rules_enforced_on_write() {
    let store = store().await;
    let mut farm = seed_farm(&store, "52998224725").await;

    let a = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        500.0,
    )
    .unwrap();
    CultivoRepository::save(&store, &a).await.unwrap();

    let too_much = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        200.5,
    )
    .unwrap();
    let err = CultivoRepository::save(&store, &too_much).await.unwrap_err();
    assert!(matches!(err, DomainError::BusinessRuleViolation { .. }));

    farm.propriedade
        .set_areas(Areas::new(1000.0, 400.0, 200.0).unwrap());
    let err = PropriedadeRepository::save(&store, &farm.propriedade)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BusinessRuleViolation { .. }));

    let stored = PropriedadeRepository::find_by_id(&store, &farm.propriedade.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.area_agricultavel().value(), 700.0);
}

/// Property with 100 ha of arable land and one season
async fn seed_small_farm(store: &SqliteStore) -> (PropriedadeRural, Cultura, Safra) {
    let produtor = Produtor::create("52998224725", "Produtor").unwrap();
    ProdutorRepository::save(store, &produtor).await.unwrap();
    let propriedade = PropriedadeRural::create(
        "Pequena",
        "Cidade",
        "RS",
        Areas::new(200.0, 100.0, 50.0).unwrap(),
    )
    .unwrap();
    store
        .save_with_owners(&propriedade, &[produtor.id()])
        .await
        .unwrap();
    let cultura = Cultura::create("Arroz").unwrap();
    CulturaRepository::save(store, &cultura).await.unwrap();
    let safra = Safra::create(propriedade.id(), 2025, None).unwrap();
    SafraRepository::save(store, &safra).await.unwrap();
    (propriedade, cultura, safra)
}

async fn plant_concurrently(store: &SqliteStore, tasks: usize, area: f64) -> usize {
    let (propriedade, cultura, safra) = seed_small_farm(store).await;

    let handles: Vec<_> = (0..tasks)
        .map(|_| {
            let store = store.clone();
            let cultivo =
                Cultivo::create(propriedade.id(), cultura.id(), safra.id(), area).unwrap();
            tokio::spawn(async move { CultivoRepository::save(&store, &cultivo).await })
        })
        .collect();

    let mut planted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => planted += 1,
            Err(DomainError::BusinessRuleViolation { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let total = store.planted_area(&safra.id(), None).await.unwrap();
    assert!(
        total.value() <= 100.0,
        "planted {} exceeds arable 100",
        total.value()
    );
    planted
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_plantings_stay_within_arable_area() {
    let store = store().await;
    assert_eq!(plant_concurrently(&store, 8, 60.0).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_plantings_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("agro.db").display());
    let store = connect(&url).await.unwrap();

    assert_eq!(plant_concurrently(&store, 8, 30.0).await, 3);
    store.close().await;
}

#[tokio::test]
async fn test_cultura_name_unique_ignoring_case() {
    let store = store().await;
    CulturaRepository::save(&store, &Cultura::create("Milho").unwrap())
        .await
        .unwrap();
    let err = CulturaRepository::save(&store, &Cultura::create("MILHO").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    assert!(store.find_by_nome("milho").await.unwrap().is_some());
}

#[tokio::test]
async fn test_cultura_in_use_cannot_be_deleted() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;
    let c = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        5.0,
    )
    .unwrap();
    CultivoRepository::save(&store, &c).await.unwrap();

    assert!(store.is_in_use(&farm.cultura.id()).await.unwrap());
    let err = CulturaRepository::delete(&store, &farm.cultura.id())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_safra_year_unique_per_propriedade() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;

    let again = Safra::create(farm.propriedade.id(), 2024, None).unwrap();
    let err = SafraRepository::save(&store, &again).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let found = store
        .find_by_propriedade_and_ano(&farm.propriedade.id(), 2024)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.descricao(), Some("verão"));
}

#[tokio::test]
async fn test_planted_area_and_safra_cascade() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;

    let plant = |area: f64| {
        Cultivo::create(
            farm.propriedade.id(),
            farm.cultura.id(),
            farm.safra.id(),
            area,
        )
        .unwrap()
    };
    let a = plant(300.0);
    let b = plant(150.25);
    CultivoRepository::save(&store, &a).await.unwrap();
    CultivoRepository::save(&store, &b).await.unwrap();

    let planted = store.planted_area(&farm.safra.id(), None).await.unwrap();
    assert_eq!(planted.value(), 450.25);
    let others = store
        .planted_area(&farm.safra.id(), Some(&a.id()))
        .await
        .unwrap();
    assert_eq!(others.value(), 150.25);
    let max = store
        .max_planted_per_safra(&farm.propriedade.id())
        .await
        .unwrap();
    assert_eq!(max.value(), 450.25);

    let filter = CultivoFilter {
        safra_id: Some(farm.safra.id()),
        ..Default::default()
    };
    assert_eq!(CultivoRepository::count(&store, filter).await.unwrap(), 2);

    let report = SafraRepository::remove_cascade(&store, &farm.safra.id())
        .await
        .unwrap();
    assert_eq!(report.safras, 1);
    assert_eq!(report.cultivos, 2);
    assert_eq!(CultivoRepository::count(&store, filter).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_pagination() {
    let store = store().await;
    let docs = ["52998224725", "12345678909", "98765432100"];
    for (i, doc) in docs.iter().enumerate() {
        let p = Produtor::create(doc, &format!("Produtor {}", i)).unwrap();
        ProdutorRepository::save(&store, &p).await.unwrap();
    }

    let page = ProdutorRepository::find_all(&store, Page::new(Some(2), Some(1)))
        .await
        .unwrap();
    let nomes: Vec<_> = page.iter().map(|p| p.nome().to_string()).collect();
    assert_eq!(nomes, vec!["Produtor 1", "Produtor 2"]);
}

#[tokio::test]
async fn test_dashboard_snapshot() {
    let store = store().await;
    let farm = seed_farm(&store, "52998224725").await;
    let sp = fazenda("Paulista", "SP");
    PropriedadeRepository::save(&store, &sp).await.unwrap();

    let c = Cultivo::create(
        farm.propriedade.id(),
        farm.cultura.id(),
        farm.safra.id(),
        250.0,
    )
    .unwrap();
    CultivoRepository::save(&store, &c).await.unwrap();

    let snap = store.snapshot().await.unwrap();
    assert_eq!(snap.total_fazendas, 2);
    assert_eq!(snap.total_hectares, 2000.0);
    assert_eq!(snap.area_agricultavel, 1400.0);
    assert_eq!(snap.area_vegetacao, 400.0);
    assert!(snap.fazendas_por_estado.contains(&(Uf::MT, 1)));
    assert!(snap.fazendas_por_estado.contains(&(Uf::SP, 1)));
    assert_eq!(snap.area_por_cultura.len(), 1);
    assert_eq!(snap.area_por_cultura[0].1, 250.0);
}

#[tokio::test]
async fn test_audit_append_and_filter() {
    let store = store().await;
    for (action, id) in [
        (AuditAction::Create, "a"),
        (AuditAction::Update, "a"),
        (AuditAction::Create, "b"),
    ] {
        store
            .append(&AuditEntry {
                id: AuditEntryId::new(),
                timestamp: chrono::Utc::now(),
                action,
                entity: EntityKind::Safra,
                entity_id: id.to_string(),
                actor: "api".to_string(),
                details: serde_json::json!({ "ano": 2024 }),
            })
            .await
            .unwrap();
    }

    let for_a = store
        .find(&AuditFilter {
            entity_id: Some("a".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_a.len(), 2);
    assert_eq!(for_a[0].action, AuditAction::Update);
    assert_eq!(for_a[0].details["ano"], 2024);

    let limited = store
        .find(&AuditFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}
