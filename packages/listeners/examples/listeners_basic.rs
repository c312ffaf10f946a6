//! A temperature sensor notifying its observers through a listener collection.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use listeners::{AddResult, Listener, Listeners, RemoveResult};

trait TemperatureObserver: Send + Sync {
    fn on_temperature(&self, celsius: i32);
}

struct Display {
    name: &'static str,
}

impl TemperatureObserver for Display {
    fn on_temperature(&self, celsius: i32) {
        println!("[{}] {celsius} °C", self.name);
    }
}

#[derive(Default)]
struct Peak {
    highest: AtomicI32,
}

impl TemperatureObserver for Peak {
    fn on_temperature(&self, celsius: i32) {
        self.highest.fetch_max(celsius, Ordering::Relaxed);
    }
}

#[derive(Default)]
struct Sensor {
    observers: Listeners<Arc<dyn TemperatureObserver>>,
    alarm: Listener<Arc<dyn TemperatureObserver>>,
}

impl Sensor {
    fn subscribe(&self, observer: Arc<dyn TemperatureObserver>) {
        if self.observers.add(observer) == AddResult::OkFirst {
            println!("first observer arrived, starting measurements");
        }
    }

    fn unsubscribe(&self, observer: &Arc<dyn TemperatureObserver>) {
        if self.observers.remove(observer) == RemoveResult::OkLast {
            println!("last observer left, stopping measurements");
        }
    }

    fn measure(&self, celsius: i32) {
        self.observers
            .invoke(|observer| observer.on_temperature(celsius));

        if celsius > 30 {
            self.alarm.invoke(|alarm| alarm.on_temperature(celsius));
        }
    }
}

fn main() {
    let sensor = Sensor::default();

    let lobby: Arc<dyn TemperatureObserver> = Arc::new(Display { name: "lobby" });
    let peak = Arc::new(Peak::default());

    sensor.subscribe(Arc::clone(&lobby));
    sensor.subscribe(Arc::clone(&peak) as Arc<dyn TemperatureObserver>);
    sensor
        .alarm
        .set(Arc::new(Display { name: "alarm" }) as Arc<dyn TemperatureObserver>);

    for celsius in [21, 25, 33, 28] {
        sensor.measure(celsius);
    }

    sensor.unsubscribe(&lobby);
    sensor.unsubscribe(&(Arc::clone(&peak) as Arc<dyn TemperatureObserver>));

    println!("peak: {} °C", peak.highest.load(Ordering::Relaxed));
}
