mod common;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use menew_api::{
    dto::{
        days::{CreateDayRequest, SetDayDishesRequest},
        dishes::CreateDishRequest,
        menus::SaveMenuRequest,
    },
    entity::days::{ActiveModel as DayActive, Entity as Days},
    error::AppError,
    middleware::auth::AuthUser,
    models::Role,
    services::{day_service, dish_service, menu_service},
    state::AppState,
};
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn day_writers_serialize_on_the_day_row() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let admin = common::create_user(&state, "admin@canteen.test", "admin-pw", Role::Admin).await?;
    let client = common::create_user(&state, "ana@canteen.test", "ana-pw", Role::Client).await?;

    let mut ids = Vec::new();
    for (name, category) in [
        ("Soup", 1),
        ("Salad", 1),
        ("Stew", 2),
        ("Hake", 2),
        ("Flan", 3),
        ("Fruit", 3),
    ] {
        let dish = dish_service::create_dish(
            &state,
            &admin,
            CreateDishRequest { name: name.into(), category },
        )
        .await?
        .data
        .unwrap();
        ids.push(dish.id);
    }

    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let day = day_service::create_or_get_day(&state, &admin, CreateDayRequest { date })
        .await?
        .response
        .data
        .unwrap();

    // Two full replacements racing for one day: exactly one set survives,
    // never a union, and overlapping ids never collide.
    let left = vec![ids[0], ids[2], ids[4]];
    let right = vec![ids[1], ids[2], ids[3], ids[5]];
    for _ in 0..40 {
        let (a, b) = tokio::join!(
            day_service::set_day_dishes(
                &state,
                &admin,
                day.id,
                SetDayDishesRequest { dish_ids: left.clone() },
            ),
            day_service::set_day_dishes(
                &state,
                &admin,
                day.id,
                SetDayDishesRequest { dish_ids: right.clone() },
            ),
        );
        a?;
        b?;

        let offered = offered_ids(&state, day.id).await?;
        assert!(
            offered == BTreeSet::from_iter(left.clone())
                || offered == BTreeSet::from_iter(right.clone()),
            "mixed assignment: {offered:?}"
        );
    }

    day_service::set_day_dishes(
        &state,
        &admin,
        day.id,
        SetDayDishesRequest { dish_ids: left.clone() },
    )
    .await?;

    // A save that starts while the day is being blocked waits for the block
    // to commit and is then refused.
    let txn = state.orm.begin().await?;
    let locked = Days::find_by_id(day.id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .unwrap();
    let mut active: DayActive = locked.into();
    active.blocked = Set(true);
    active.update(&txn).await?;

    let pending = tokio::spawn(save(state.clone(), client.clone(), date, &left));
    tokio::task::yield_now().await;
    txn.commit().await?;

    assert!(matches!(pending.await?, Err(AppError::Validation(_))));
    assert!(menu_service::list_menus(&state, &client).await?.data.unwrap().items.is_empty());

    Ok(())
}

async fn offered_ids(state: &AppState, day_id: i32) -> anyhow::Result<BTreeSet<i32>> {
    Ok(day_service::dishes_for_day(state, day_id)
        .await?
        .data
        .unwrap()
        .items
        .into_iter()
        .map(|d| d.id)
        .collect())
}

fn save(
    state: AppState,
    user: AuthUser,
    day: NaiveDate,
    dishes: &[i32],
) -> impl Future<Output = Result<(), AppError>> + Send + 'static {
    let payload = SaveMenuRequest {
        day: Some(day),
        first_dish_id: Some(dishes[0]),
        second_dish_id: Some(dishes[1]),
        dessert_id: Some(dishes[2]),
    };
    async move {
        menu_service::save_menu(&state, &user, payload).await?;
        Ok(())
    }
}
